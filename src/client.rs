use crate::{
    config::{Config, ConfigBuilder},
    error::{DataqError, Result},
    queue::{build_queue_uri, QueueStats},
};
use std::collections::HashMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// The main client for talking to a DataQ server.
///
/// `DataqClient` speaks DataQ's line-oriented text protocol over TCP. Every
/// operation opens a fresh connection, writes a single newline-terminated
/// command, reads the response until the server closes the stream, and closes
/// the connection before returning. The client keeps no connection state
/// between calls, so a single instance can be shared freely across tasks.
///
/// # Examples
///
/// Basic usage:
/// ```no_run
/// use dataq_client::DataqClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), dataq_client::DataqError> {
///     let client = DataqClient::connect("127.0.0.1", 50000).await?;
///
///     // Push a message
///     client.push("jobs", "Hello, World!").await?;
///
///     // Pop it back off
///     let message = client.pop("jobs").await?;
///     println!("Popped: {}", message);
///
///     Ok(())
/// }
/// ```
pub struct DataqClient {
    config: Config,
    addr: String,
}

impl DataqClient {
    /// Creates a client for the given endpoint with default configuration.
    ///
    /// A probe connection is opened (and immediately closed) to verify the
    /// server is reachable, so construction fails fast against a dead
    /// endpoint. Nothing is retained: the server can still become
    /// unreachable between construction and the first operation.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the DataQ server
    /// * `port` - The port number of the DataQ server
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dataq_client::DataqClient;
    ///
    /// # async fn example() -> Result<(), dataq_client::DataqError> {
    /// let client = DataqClient::connect("127.0.0.1", 50000).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DataqError::Connection`] if the probe connection is refused
    /// and [`DataqError::Timeout`] if it does not complete within the
    /// connect timeout (30 seconds by default).
    pub async fn connect(host: impl Into<String>, port: u16) -> Result<Self> {
        let config = ConfigBuilder::new().host(host).port(port).build();

        Self::with_config(config).await
    }

    /// Creates a client with custom configuration.
    ///
    /// Use this when you need credentials, a different connect timeout, or
    /// control over the response read deadline.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dataq_client::{DataqClient, ConfigBuilder};
    /// use std::time::Duration;
    ///
    /// # async fn example() -> Result<(), dataq_client::DataqError> {
    /// let config = ConfigBuilder::new()
    ///     .host("queue.example.com")
    ///     .port(50000)
    ///     .credentials("alice", "secret")
    ///     .connect_timeout(Duration::from_secs(5))
    ///     .build();
    ///
    /// let client = DataqClient::with_config(config).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`connect`](Self::connect): the probe connection must succeed.
    pub async fn with_config(config: Config) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let client = Self { config, addr };

        // Probe to see if the DataQ server is there.
        let stream = client.open_stream().await?;
        drop(stream);
        tracing::debug!(addr = %client.addr, "probe connection succeeded");

        Ok(client)
    }

    /// Returns a [`ConfigBuilder`] for creating custom configurations.
    ///
    /// Equivalent to [`ConfigBuilder::new()`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Builds the wire form of a queue address for this client's credentials.
    ///
    /// With no credentials configured the name is returned unchanged. With a
    /// password set the result is `password@name`; with a username set on top
    /// of that, `username:password@name`. No escaping is performed.
    pub fn queue_uri(&self, queue_name: &str) -> String {
        build_queue_uri(
            self.config.username.as_deref(),
            self.config.password.as_deref(),
            queue_name,
        )
    }

    /// Checks whether the server currently accepts connections.
    ///
    /// Opens one probe connection within the configured connect timeout and
    /// closes it without sending anything.
    pub async fn health_check(&self) -> bool {
        self.open_stream().await.is_ok()
    }

    /// Lists the names of all queues on the server, in server order.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dataq_client::DataqClient;
    ///
    /// # async fn example() -> Result<(), dataq_client::DataqError> {
    /// let client = DataqClient::connect("127.0.0.1", 50000).await?;
    /// for name in client.list_queues().await? {
    ///     println!("queue: {}", name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// * [`DataqError::Protocol`] if the server answers with an ERROR frame
    /// * [`DataqError::MalformedResponse`] if a listing line has no colon
    /// * [`DataqError::Connection`] / [`DataqError::Timeout`] for transport failures
    pub async fn list_queues(&self) -> Result<Vec<String>> {
        let uri = self.queue_uri("");
        let command = if uri.is_empty() {
            "STAT".to_string()
        } else {
            format!("STAT {}", uri)
        };

        let mut lines = self.send_command(&command).await?;
        lines.pop(); // Trailing newline artifact

        let mut queues = Vec::with_capacity(lines.len());
        for line in &lines {
            let (_, name) = split_stat_line(line)?;
            queues.push(name.to_string());
        }

        Ok(queues)
    }

    /// Fetches the raw statistics fields for one queue.
    ///
    /// Each response line is split on its first colon into a key and a
    /// value; the value may itself contain colons. Repeated keys keep the
    /// last value seen.
    ///
    /// # Errors
    ///
    /// * [`DataqError::Validation`] if `queue_name` is empty
    /// * [`DataqError::Protocol`] if the server answers with an ERROR frame
    ///   (e.g. code 201, unknown queue)
    /// * [`DataqError::MalformedResponse`] if a response line has no colon
    pub async fn queue_info(&self, queue_name: &str) -> Result<HashMap<String, String>> {
        let uri = self.addressed(queue_name)?;

        let mut lines = self.send_command(&format!("STAT {}", uri)).await?;
        lines.pop(); // Trailing newline artifact

        let mut info = HashMap::with_capacity(lines.len());
        for line in &lines {
            let (key, value) = split_stat_line(line)?;
            info.insert(key.to_string(), value.to_string());
        }

        Ok(info)
    }

    /// Fetches one queue's statistics as a typed [`QueueStats`] view.
    ///
    /// # Errors
    ///
    /// Everything [`queue_info`](Self::queue_info) can fail with, plus
    /// [`DataqError::MalformedResponse`] when a statistics field is missing
    /// or not numeric.
    pub async fn queue_stats(&self, queue_name: &str) -> Result<QueueStats> {
        let info = self.queue_info(queue_name).await?;
        QueueStats::from_info(&info)
    }

    /// Pushes a message onto a queue.
    ///
    /// The message must not contain a newline: the server reads commands up
    /// to the first newline, so an embedded one would terminate the request
    /// early, and the protocol has no escape mechanism.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dataq_client::DataqClient;
    ///
    /// # async fn example() -> Result<(), dataq_client::DataqError> {
    /// let client = DataqClient::connect("127.0.0.1", 50000).await?;
    /// client.push("jobs", "resize image 42").await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// * [`DataqError::Validation`] if `queue_name` is empty or the message
    ///   contains a newline
    /// * [`DataqError::Protocol`] for server-reported failures (unknown
    ///   queue, queue full, access denied)
    pub async fn push(&self, queue_name: &str, message: impl Into<String>) -> Result<()> {
        let uri = self.addressed(queue_name)?;
        let message = message.into();

        if message.contains('\n') {
            return Err(DataqError::Validation(
                "Message must not contain a newline".to_string(),
            ));
        }

        self.send_command(&format!("PUSH {} {}", uri, message))
            .await?;
        Ok(())
    }

    /// Pops the next message off a queue.
    ///
    /// Returns the first line of the server's response. An empty queue
    /// yields an empty string; only an ERROR frame is treated as failure.
    ///
    /// # Errors
    ///
    /// * [`DataqError::Validation`] if `queue_name` is empty
    /// * [`DataqError::Protocol`] for server-reported failures
    pub async fn pop(&self, queue_name: &str) -> Result<String> {
        let uri = self.addressed(queue_name)?;

        let lines = self.send_command(&format!("POP {}", uri)).await?;
        Ok(lines.into_iter().next().unwrap_or_default())
    }

    /// Reads the next message off a queue without removing it.
    ///
    /// Same response handling as [`pop`](Self::pop); leaving the message in
    /// place is the server's guarantee, not the client's.
    ///
    /// # Errors
    ///
    /// * [`DataqError::Validation`] if `queue_name` is empty
    /// * [`DataqError::Protocol`] for server-reported failures
    pub async fn peek(&self, queue_name: &str) -> Result<String> {
        let uri = self.addressed(queue_name)?;

        let lines = self.send_command(&format!("PEEK {}", uri)).await?;
        Ok(lines.into_iter().next().unwrap_or_default())
    }

    /// Removes all messages from a queue.
    ///
    /// # Errors
    ///
    /// * [`DataqError::Validation`] if `queue_name` is empty
    /// * [`DataqError::Protocol`] for server-reported failures
    pub async fn clear(&self, queue_name: &str) -> Result<()> {
        let uri = self.addressed(queue_name)?;

        self.send_command(&format!("CLEAR {}", uri)).await?;
        Ok(())
    }

    /// One request/response exchange: connect, send, read to end-of-stream,
    /// classify. The stream is dropped on every exit path.
    async fn send_command(&self, command: &str) -> Result<Vec<String>> {
        let framed = frame_command(command);

        let mut stream = self.open_stream().await?;

        tracing::debug!(addr = %self.addr, bytes = framed.len(), "sending command");
        stream.write_all(framed.as_bytes()).await?;
        stream.flush().await?;

        let mut response = Vec::new();
        match self.config.read_timeout {
            Some(limit) => {
                timeout(limit, stream.read_to_end(&mut response))
                    .await
                    .map_err(|_| DataqError::Timeout(limit.as_millis() as u64))??;
            }
            None => {
                stream.read_to_end(&mut response).await?;
            }
        }
        drop(stream);
        tracing::debug!(addr = %self.addr, bytes = response.len(), "response received");

        let response = String::from_utf8_lossy(&response);
        parse_response(&response)
    }

    async fn open_stream(&self) -> Result<TcpStream> {
        tracing::debug!(addr = %self.addr, "connecting");
        timeout(self.config.connect_timeout, TcpStream::connect(&self.addr))
            .await
            .map_err(|_| DataqError::Timeout(self.config.connect_timeout.as_millis() as u64))?
            .map_err(|e| DataqError::Connection(e.to_string()))
    }

    /// Validates and credential-prefixes a caller-supplied queue name.
    fn addressed(&self, queue_name: &str) -> Result<String> {
        if queue_name.is_empty() {
            return Err(DataqError::Validation(
                "Queue name must not be empty".to_string(),
            ));
        }

        Ok(self.queue_uri(queue_name))
    }
}

/// Terminates a command with exactly one newline; an already-terminated
/// command is left alone.
fn frame_command(command: &str) -> String {
    if command.ends_with('\n') {
        command.to_string()
    } else {
        format!("{}\n", command)
    }
}

// Helper to classify a raw response - extracted for testing
fn parse_response(response: &str) -> Result<Vec<String>> {
    if response.starts_with("ERROR") {
        let mut parts = response.splitn(3, ' ');
        let _tag = parts.next();
        let code = parts.next();
        let message = parts.next();

        return match (code, message) {
            (Some(code), Some(message)) => Err(DataqError::Protocol {
                code: code.to_string(),
                message: message.to_string(),
            }),
            _ => {
                tracing::warn!("unparseable ERROR frame: {:?}", response);
                Err(DataqError::MalformedResponse(format!(
                    "Truncated ERROR frame: '{}'",
                    response.trim_end()
                )))
            }
        };
    }

    Ok(response.split('\n').map(str::to_string).collect())
}

/// Splits a STAT listing line on its first colon.
fn split_stat_line(line: &str) -> Result<(&str, &str)> {
    line.split_once(':').ok_or_else(|| {
        DataqError::MalformedResponse(format!("STAT line without a colon: '{}'", line))
    })
}
