/*!
 * Monitoring
 * Subscriber setup for the crate's tracing events
 */

mod tracer;

pub use tracer::init_tracing;
