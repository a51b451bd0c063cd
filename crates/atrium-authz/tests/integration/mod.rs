mod guard_flow;
mod query_flow;
mod sync_flow;
