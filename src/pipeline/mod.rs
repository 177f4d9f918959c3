mod orchestrator;
mod queue;
mod recovery;
mod stats;
mod worker_pool;

pub use orchestrator::Orchestrator;
pub use queue::StageQueue;
pub use recovery::{PipelineError, Retry};
pub use stats::{PipelineStats, StatsSnapshot};
pub use worker_pool::WorkerPool;

pub(crate) use worker_pool::join_with_timeout;
