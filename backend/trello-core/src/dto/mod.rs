pub mod update_card;

pub use update_card::UpdateCardPayload;
