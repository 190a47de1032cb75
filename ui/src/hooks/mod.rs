pub mod use_staking_store;
