//! End-to-end checks of the reqwest transport and the flow controllers against an
//! in-process mock backend.

mod backend;
mod flow_tests;
mod transport_tests;
