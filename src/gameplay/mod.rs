pub mod events;
pub mod flower;
pub mod growth;
pub mod health;
pub mod rules;
pub mod score;
pub mod spawn;
