// Use cases layer: application workflows for the duel server.

pub mod purchase;
pub mod start_duel;
pub mod tick;

#[cfg(test)]
pub(crate) mod test_support;

pub use purchase::{PurchaseReceipt, PurchaseUseCase};
pub use start_duel::{NewDuel, StartDuelUseCase};
pub use tick::{TickReport, TickUseCase};
