multiversx_sc::imports!();

use gov_common::errors::ERR_NO_SUCH_NODE;

use crate::types::NodeInfo;

/// Dense node list. Removal moves the last node into the hole, so positions
/// change while ids never do.
#[multiversx_sc::module]
pub trait NodesModule {
    fn insert_node(&self, info: ManagedBuffer, rpc_url: ManagedBuffer, intro: ManagedBuffer) -> u64 {
        let id = self.last_node_id().get() + 1;
        self.last_node_id().set(id);

        let node = NodeInfo {
            id,
            info,
            rpc_url,
            intro,
        };
        let position = self.nodes().push(&node);
        self.node_position(id).set(position);

        let caller = self.blockchain().get_caller();
        self.new_node_event(id, &caller, &node);
        id
    }

    fn remove_node(&self, node_id: u64) {
        let position = self.node_position(node_id).get();
        require!(position > 0, ERR_NO_SUCH_NODE);

        let mut nodes = self.nodes();
        nodes.swap_remove(position);
        if position <= nodes.len() {
            let moved = nodes.get(position);
            self.node_position(moved.id).set(position);
        }
        self.node_position(node_id).clear();

        let caller = self.blockchain().get_caller();
        self.remove_node_event(node_id, &caller);
    }

    /// 0-based position of a live node.
    fn find_node(&self, node_id: u64) -> Option<usize> {
        self.node_position(node_id).get().checked_sub(1)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getNode)]
    fn get_node(&self, index: usize) -> NodeInfo<Self::Api> {
        let nodes = self.nodes();
        require!(index < nodes.len(), ERR_NO_SUCH_NODE);
        nodes.get(index + 1)
    }

    #[view(getNodeIndex)]
    fn get_node_index(&self, node_id: u64) -> Option<usize> {
        self.find_node(node_id)
    }

    #[view(getNodeCount)]
    fn get_node_count(&self) -> usize {
        self.nodes().len()
    }

    #[view(getAllNodes)]
    fn get_all_nodes(&self) -> MultiValueEncoded<NodeInfo<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for node in self.nodes().iter() {
            result.push(node);
        }
        result
    }

    // ========================================================
    // EVENTS
    // ========================================================

    /// `caller` is whoever triggered the insertion (the proposal executor).
    #[event("newNode")]
    fn new_node_event(
        &self,
        #[indexed] node_id: u64,
        #[indexed] caller: &ManagedAddress,
        node: &NodeInfo<Self::Api>,
    );

    #[event("removeNode")]
    fn remove_node_event(&self, #[indexed] node_id: u64, #[indexed] caller: &ManagedAddress);

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getLastNodeId)]
    #[storage_mapper("lastNodeId")]
    fn last_node_id(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("nodes")]
    fn nodes(&self) -> VecMapper<NodeInfo<Self::Api>>;

    /// 1-based position in `nodes`; empty once the node is removed.
    #[storage_mapper("nodePosition")]
    fn node_position(&self, node_id: u64) -> SingleValueMapper<usize>;
}
