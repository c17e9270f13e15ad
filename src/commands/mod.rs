mod candidate;
mod closest;
mod contests;
mod dump;
mod results;
mod summary;

pub use candidate::candidate;
pub use closest::closest;
pub use contests::contests;
pub use dump::dump;
pub use results::results;
pub use summary::summary;
