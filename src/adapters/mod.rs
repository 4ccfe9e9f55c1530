// Adapters layer: concrete implementations of the domain ports.

pub mod rocketchat;
pub mod storage;

pub use rocketchat::RocketChatClient;
pub use storage::LocalStorage;
