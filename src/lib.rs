//! # DataQ Rust Client
//!
//! A Rust client library for DataQ - a simple message/data queueing server
//! speaking a line-oriented text protocol over TCP.
//!
//! This library provides an async, type-safe interface for interacting with
//! DataQ servers: listing queues, inspecting queue statistics, pushing,
//! popping and peeking messages, and clearing queues. Each operation opens a
//! fresh connection, exchanges exactly one request and response, and closes
//! the connection before returning.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dataq_client::DataqClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a client; construction probes the server once
//!     let client = DataqClient::connect("127.0.0.1", 50000).await?;
//!
//!     // Push a message onto a queue
//!     client.push("jobs", "Hello, DataQ!").await?;
//!
//!     // List the queues on the server
//!     for name in client.list_queues().await? {
//!         println!("queue: {}", name);
//!     }
//!
//!     // Pop the message back off
//!     let message = client.pop("jobs").await?;
//!     println!("Popped: {}", message);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Async/await support** - Built on Tokio
//! - **Connection per operation** - No pooling, no shared state; a client
//!   can be used concurrently from many tasks
//! - **Typed errors** - Server `ERROR` frames, transport failures and
//!   malformed responses are distinct [`DataqError`] variants
//! - **Queue addressing** - Optional `username:password@queue` credential
//!   prefixing on every command
//! - **Bounded reads** - Response reads carry a deadline by default instead
//!   of waiting forever on a stuck server
//!
//! ## Configuration
//!
//! Use [`ConfigBuilder`] for advanced configuration:
//!
//! ```no_run
//! use dataq_client::{DataqClient, ConfigBuilder};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), dataq_client::DataqError> {
//! let client = DataqClient::with_config(
//!     ConfigBuilder::new()
//!         .host("queue.example.com")
//!         .port(50000)
//!         .credentials("alice", "secret")
//!         .connect_timeout(Duration::from_secs(5))
//!         .read_timeout(Duration::from_secs(10))
//!         .build()
//! ).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod queue;

pub use client::DataqClient;
pub use config::{Config, ConfigBuilder};
pub use error::{DataqError, Result};
pub use queue::QueueStats;
