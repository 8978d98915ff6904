pub mod wire;
pub mod territory;
pub mod citizen;
pub mod scope;
pub mod ledger;
pub mod aspiration;
pub mod announcement;
pub mod audit;
pub mod config;

pub use wire::WireLabel;
pub use territory::*;
pub use citizen::*;
pub use scope::*;
pub use ledger::*;
pub use aspiration::*;
pub use announcement::*;
pub use audit::*;
pub use config::*;
