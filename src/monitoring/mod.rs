/*!
 * Monitoring
 * Structured logging for the sensor
 */

mod tracer;

pub use tracer::{env_filter, init_tracing};
