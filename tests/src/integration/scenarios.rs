//! # Cluster Scenarios
//!
//! Full clusters of `NodeActor`s wired through the in-memory network. Runs are
//! started together under a paused clock, so every node moves through its
//! rounds in lockstep and outcomes are deterministic apart from coin flips.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use futures::future::join_all;

    use cf_consensus::{
        ClusterReadiness, ConsensusConfig, ConsensusError, ConsensusState, InMemoryNetwork,
        NodeActor, NodeApi, NodeId, NodeIdentity, NodeStatus, ReadinessSignal, SeededCoin,
        StateSnapshot, Value,
    };

    type Node = NodeActor<InMemoryNetwork, ClusterReadiness>;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct TestCluster {
        network: Arc<InMemoryNetwork>,
        readiness: Arc<ClusterReadiness>,
        nodes: Vec<Node>,
    }

    struct ClusterBuilder {
        values: Vec<Value>,
        fault_tolerance: usize,
        faulty: Vec<NodeId>,
        ready: bool,
        coin_seed: Option<u64>,
    }

    impl ClusterBuilder {
        fn new(values: &[u8], fault_tolerance: usize) -> Self {
            Self {
                values: values
                    .iter()
                    .map(|&bit| Value::try_from(bit).unwrap())
                    .collect(),
                fault_tolerance,
                faulty: Vec::new(),
                ready: true,
                coin_seed: None,
            }
        }

        fn faulty(mut self, ids: &[NodeId]) -> Self {
            self.faulty = ids.to_vec();
            self
        }

        fn not_ready(mut self) -> Self {
            self.ready = false;
            self
        }

        fn coin_seed(mut self, seed: u64) -> Self {
            self.coin_seed = Some(seed);
            self
        }

        fn build(self) -> TestCluster {
            let n = self.values.len();
            let network = Arc::new(InMemoryNetwork::new());
            let readiness = Arc::new(if self.ready {
                ClusterReadiness::all_ready(n)
            } else {
                ClusterReadiness::new(n)
            });

            let nodes = self
                .values
                .iter()
                .enumerate()
                .map(|(id, &value)| {
                    let identity = NodeIdentity::new(
                        id,
                        n,
                        self.fault_tolerance,
                        self.faulty.contains(&id),
                    )
                    .unwrap();
                    let mut node = NodeActor::new(
                        identity,
                        value,
                        ConsensusConfig::with_collect_window(Duration::from_millis(100)),
                        Arc::clone(&network),
                        Arc::clone(&readiness),
                    );
                    if let Some(seed) = self.coin_seed {
                        node = node.with_coin_source(Box::new(SeededCoin::new(seed + id as u64)));
                    }
                    network.attach(id, node.inbox());
                    node
                })
                .collect();

            TestCluster {
                network,
                readiness,
                nodes,
            }
        }
    }

    impl TestCluster {
        async fn start_all(&self) -> Vec<StateSnapshot> {
            join_all(self.nodes.iter().map(|node| node.start()))
                .await
                .into_iter()
                .map(|outcome| outcome.unwrap())
                .collect()
        }

        async fn start_subset(&self, ids: &[NodeId]) -> Vec<StateSnapshot> {
            join_all(ids.iter().map(|&id| self.nodes[id].start()))
                .await
                .into_iter()
                .map(|outcome| outcome.unwrap())
                .collect()
        }
    }

    fn decided(x: Value, k: u32) -> StateSnapshot {
        StateSnapshot {
            decided: Some(true),
            x: Some(x),
            k: Some(k),
        }
    }

    // =========================================================================
    // SCENARIO A: UNANIMOUS HONEST CLUSTER
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_unanimous_cluster_decides_in_first_round() {
        let cluster = ClusterBuilder::new(&[0, 0, 0], 0).build();

        let states = cluster.start_all().await;

        assert_eq!(states, vec![decided(Value::Zero, 0); 3]);
        for node in &cluster.nodes {
            assert_eq!(node.get_state(), decided(Value::Zero, 0));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_majority_decides_in_first_round() {
        let cluster = ClusterBuilder::new(&[1, 1, 1, 0, 1], 2).build();

        let states = cluster.start_all().await;

        assert_eq!(states, vec![decided(Value::One, 0); 5]);
    }

    // =========================================================================
    // SCENARIO B: FAULTY NODE, NO MAJORITY, BOUNDED TERMINATION
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_split_cluster_with_faulty_node_stops_after_f_plus_one_rounds() {
        let cluster = ClusterBuilder::new(&[0, 1, 1, 1], 1).faulty(&[3]).build();

        let states = cluster.start_all().await;

        for (id, state) in states.iter().take(3).enumerate() {
            assert_eq!(state.decided, Some(false), "node {id}");
            assert_eq!(state.k, Some(2), "node {id}");
            assert!(state.x.is_some(), "node {id}");
        }
        assert!(states[3].is_undefined());
        assert!(cluster.nodes[3].get_state().is_undefined());
        assert_eq!(cluster.nodes[3].status(), NodeStatus::Faulty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_termination_bound_holds_across_coin_outcomes() {
        for seed in 0..16 {
            let cluster = ClusterBuilder::new(&[0, 1, 0, 1], 3).coin_seed(seed).build();

            for state in cluster.start_all().await {
                let k = state.k.unwrap();
                if state.decided == Some(true) {
                    assert!(k < 4, "seed {seed}: decided at k={k}");
                } else {
                    assert_eq!(k, 4, "seed {seed}");
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_coins_reproduce_the_same_run() {
        let first = ClusterBuilder::new(&[0, 1, 0, 1], 3).coin_seed(7).build();
        let second = ClusterBuilder::new(&[0, 1, 0, 1], 3).coin_seed(7).build();

        assert_eq!(first.start_all().await, second.start_all().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decided_nodes_agree() {
        for seed in 0..16 {
            let cluster = ClusterBuilder::new(&[0, 1, 1, 0, 1, 0], 5)
                .coin_seed(seed)
                .build();

            let states = cluster.start_all().await;
            let decided_values: Vec<_> = states
                .iter()
                .filter(|state| state.decided == Some(true))
                .map(|state| state.x)
                .collect();

            if let Some(first) = decided_values.first() {
                assert!(
                    decided_values.iter().all(|value| value == first),
                    "seed {seed}: {states:?}"
                );
            }
        }
    }

    // =========================================================================
    // SCENARIO C: START BEFORE THE CLUSTER IS READY
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_start_before_ready_is_rejected_without_state_change() {
        let cluster = ClusterBuilder::new(&[1, 0, 1], 1).not_ready().build();

        let outcome = cluster.nodes[0].start().await;

        assert!(matches!(outcome, Err(ConsensusError::NotReady)));
        assert_eq!(
            cluster.nodes[0].get_state(),
            StateSnapshot::from(ConsensusState::idle())
        );
        assert_eq!(cluster.nodes[0].get_state().k, Some(0));
        assert_eq!(cluster.nodes[0].get_state().x, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_succeeds_once_every_node_signals_ready() {
        let cluster = ClusterBuilder::new(&[1, 1, 1], 0).not_ready().build();

        for id in 0..3 {
            assert!(cluster.nodes[0].start().await.is_err());
            cluster.readiness.set_node_ready(id);
        }

        assert_eq!(cluster.start_all().await, vec![decided(Value::One, 0); 3]);
    }

    // =========================================================================
    // SCENARIO D: UNREACHABLE PEER
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_peer_does_not_abort_runs() {
        let cluster = ClusterBuilder::new(&[1, 1, 1], 1).build();
        cluster.network.disconnect(2);

        let states = cluster.start_subset(&[0, 1]).await;

        assert_eq!(states, vec![decided(Value::One, 0); 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_isolated_node_runs_to_completion_alone() {
        let cluster = ClusterBuilder::new(&[1, 1, 1], 1).build();
        for id in 0..3 {
            cluster.network.disconnect(id);
        }

        let states = cluster.start_all().await;

        for state in states {
            assert_eq!(state.decided, Some(false));
            assert_eq!(state.k, Some(2));
            assert!(state.x.is_some());
        }
    }
}
