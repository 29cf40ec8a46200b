use multiversx_sc::proxy_imports::*;

/// Read-only view of a deployed `operators-gov` contract.
pub struct OperatorsGovProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for OperatorsGovProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = OperatorsGovProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        OperatorsGovProxyMethods { wrapped_tx: tx }
    }
}

pub struct OperatorsGovProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> OperatorsGovProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn is_operator<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        addr: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isOperator")
            .argument(&addr)
            .original_result()
    }

    /// Addresses of elected operators, in slot order.
    pub fn get_elected_operators(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, MultiValueEncoded<Env::Api, ManagedAddress<Env::Api>>>
    {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getElectedOperators")
            .original_result()
    }
}
