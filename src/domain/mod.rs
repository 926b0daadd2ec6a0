mod account;
mod alert;
mod bill;
mod clock;
mod investment;
mod ledger;
mod loan;
mod money;
mod recipient;
mod seed;
mod transaction;
mod validation;

pub use account::*;
pub use alert::*;
pub use bill::*;
pub use clock::*;
pub use investment::*;
pub use ledger::*;
pub use loan::*;
pub use money::*;
pub use recipient::*;
pub use seed::*;
pub use transaction::*;
pub use validation::*;
