pub mod http_state_querier;
