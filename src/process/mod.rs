/*!
 * Process Module
 * Task directory consulted when attributing samples to processes
 */

mod cache;
mod traits;
mod types;

pub use cache::ProcessCache;
pub use traits::ProcessDirectory;
pub use types::{ContainerInfo, ContainerRuntime, ContainerState, Credentials, Task};
