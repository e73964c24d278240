// Service exports
pub mod appwrite;
pub mod store;

pub use appwrite::{AppwriteClient, AppwriteCollections};
pub use store::{or_empty, CandidateStore, JobStore, NotificationSink, NotificationStore, StoreError};
