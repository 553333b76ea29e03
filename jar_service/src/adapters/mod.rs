// jar_service/src/adapters/mod.rs

pub mod kafka_publisher;
pub mod pg_store;

pub use kafka_publisher::KafkaJarPublisher;
pub use pg_store::PgJarStore;
