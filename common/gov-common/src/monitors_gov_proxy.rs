use multiversx_sc::proxy_imports::*;

/// Read-only view of a deployed `monitors-gov` contract.
pub struct MonitorsGovProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for MonitorsGovProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = MonitorsGovProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        MonitorsGovProxyMethods { wrapped_tx: tx }
    }
}

pub struct MonitorsGovProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> MonitorsGovProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn is_monitor<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        addr: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isMonitor")
            .argument(&addr)
            .original_result()
    }
}
