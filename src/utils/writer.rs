use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};

#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use tokio::sync::Mutex as TokioMutex;

/// A trait for writing messages to an output stream.
/// This abstraction allows replacing the actual output writer in tests.
#[async_trait]
pub trait MessageWriter: Send + Sync {
    /// Write a message to the output stream and flush it.
    async fn write_message(&mut self, message: &str) -> Result<()>;

    /// Flush and release the output stream. No messages are written afterwards.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// The default implementation of MessageWriter that writes to Stdout.
pub struct StdoutWriter {
    stdout: Stdout,
}

impl StdoutWriter {
    pub fn new(stdout: Stdout) -> Self {
        Self { stdout }
    }
}

#[async_trait]
impl MessageWriter for StdoutWriter {
    async fn write_message(&mut self, message: &str) -> Result<()> {
        self.stdout.write_all(message.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.stdout.flush().await?;
        Ok(())
    }
}

/// A mock writer implementation for testing.
#[cfg(test)]
pub struct MockWriter {
    /// Stores all messages written to this writer
    pub messages: Arc<TokioMutex<Vec<String>>>,
    pub closed: Arc<TokioMutex<bool>>,
}

#[cfg(test)]
impl MockWriter {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(TokioMutex::new(Vec::new())),
            closed: Arc::new(TokioMutex::new(false)),
        }
    }

    /// Get a clone of all messages that have been written
    pub async fn get_messages(&self) -> Vec<String> {
        self.messages.lock().await.clone()
    }
}

#[cfg(test)]
#[async_trait]
impl MessageWriter for MockWriter {
    async fn write_message(&mut self, message: &str) -> Result<()> {
        let mut messages = self.messages.lock().await;
        messages.push(message.to_string());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        *self.closed.lock().await = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stdout_writer() {
        // Only checks that writing does not error; stdout itself is not captured
        let mut writer = StdoutWriter::new(tokio::io::stdout());
        assert!(writer.write_message("Test message").await.is_ok());
        assert!(writer.close().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_writer() {
        let mut writer = MockWriter::new();

        writer.write_message("Message 1").await.unwrap();
        writer.write_message("Message 2").await.unwrap();

        let messages = writer.get_messages().await;
        assert_eq!(messages, vec!["Message 1", "Message 2"]);

        writer.close().await.unwrap();
        assert!(*writer.closed.lock().await);
    }
}
