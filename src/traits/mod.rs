pub mod state_querier;
