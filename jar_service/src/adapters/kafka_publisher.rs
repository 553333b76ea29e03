// jar_service/src/adapters/kafka_publisher.rs

use async_trait::async_trait;
use clayjar::{JarEvent, JarPublisher, PublishFailure};
use rdkafka::config::ClientConfig;
use rdkafka::error::KafkaError;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{debug, instrument};

pub const EVENT_TYPE_HEADER: &str = "event-type";

/// Publishes jar events to one Kafka topic, keyed by jar id.
pub struct KafkaJarPublisher {
  producer: FutureProducer,
  topic: String,
  queue_timeout: Duration,
}

impl KafkaJarPublisher {
  pub fn new(brokers: &[String], topic: &str, delivery_timeout: Duration) -> Result<Self, KafkaError> {
    let producer: FutureProducer = ClientConfig::new()
      .set("bootstrap.servers", brokers.join(","))
      .set("acks", "1")
      .set("compression.type", "snappy")
      .set("linger.ms", "10")
      .set("batch.num.messages", "100")
      .set("message.timeout.ms", delivery_timeout.as_millis().to_string())
      .create()?;

    Ok(Self {
      producer,
      topic: topic.to_string(),
      queue_timeout: delivery_timeout,
    })
  }

  /// Waits for queued records to be delivered.
  pub fn flush(&self, timeout: Duration) -> Result<(), KafkaError> {
    self.producer.flush(Timeout::After(timeout))
  }
}

#[async_trait]
impl JarPublisher for KafkaJarPublisher {
  #[instrument(name = "kafka::publish", skip_all, fields(event_type = %event.kind, jar_id = %event.jar_id))]
  async fn publish(&self, event: &JarEvent) -> Result<(), PublishFailure> {
    let payload = serde_json::to_vec(event)?;
    let headers = OwnedHeaders::new().insert(Header {
      key: EVENT_TYPE_HEADER,
      value: Some(event.kind.as_str()),
    });
    let record = FutureRecord::to(&self.topic)
      .key(event.jar_id.as_str())
      .payload(&payload)
      .timestamp(event.timestamp.timestamp_millis())
      .headers(headers);

    let (partition, offset) = self
      .producer
      .send(record, Timeout::After(self.queue_timeout))
      .await
      .map_err(|(err, _undelivered)| PublishFailure::Delivery(anyhow::Error::new(err)))?;
    debug!(partition, offset, "event delivered");
    Ok(())
  }
}
