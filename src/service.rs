use std::sync::Arc;
use tokio::sync::mpsc;
use log::{debug, error, info};

use crate::AiFoot;

/// Public API for the AI service - owns the task
pub struct AiService
{   hand: crate::AiHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl AiService
{   /// Create and spawn a new AI service
    /// Returns immediately - spawns background task
    pub fn new(
      config: crate::config::DispatcherConfig
    , usage_tx: Option<mpsc::UnboundedSender<
        crate::usage::UsageEvent
      >>
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating AiService with task ownership");

        let dispatcher = Arc::new(
          crate::dispatcher::PromptDispatcher::new(
            config
          , usage_tx
          )?
        );

        let (dispatch_prompt_tx, dispatch_prompt_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::AiHand
        {   dispatch_prompt_tx: dispatch_prompt_tx.clone()
          , kill_process_tx: kill_process_tx.clone()
        };

        let foot = crate::AiFoot
        {   dispatch_prompt_rx
          , kill_process_rx
        };

        let _task_handle = tokio::spawn(async move {
          run_service_loop(foot, dispatcher).await
        });

        Ok(AiService
        {   hand
          , _task_handle
        })
    }

    /// Queue a prompt - returns almost immediately.
    /// The receiver yields the answer string once the pipeline
    /// finishes; it is never an error.
    pub async fn ask(
      &self
    , request: crate::request::PromptRequest
    ) -> Result<
        mpsc::UnboundedReceiver<crate::DispatchPromptReply>,
        crate::error::Error
      >
    {   debug!("ask queuing prompt");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::DispatchPromptArgs
        {   request
          , reply: reply_tx
        };

        self.hand.dispatch_prompt_tx
          .send(cmd)
          .map_err(|_| {
            error!("Service channel closed");
            crate::error::Error::Other(
              "Service disconnected".to_string()
            )
          })?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the service
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down AiService");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Service channel already closed");
            crate::error::Error::Other(
              "Service already shutdown".to_string()
            )
          })?;

        // Wait for shutdown confirmation
        if let Some(result) = reply_rx.recv().await
        {   debug!("Service shutdown confirmed");
            result
        } else
        {   error!("Service shutdown reply channel dropped");
            Err(crate::error::Error::Other(
              "Shutdown not confirmed".to_string()
            ))
        }
    }
}

/// Main service event loop
///
/// Design: tokio::select! is ONLY for fast queueing.
/// Each dispatch runs in its own spawned task, so a slow
/// upstream never stalls the loop or other prompts.
async fn run_service_loop(
  foot: crate::AiFoot
, dispatcher: Arc<crate::dispatcher::PromptDispatcher>
)
{   debug!("Starting AiService event loop");
    let AiFoot
    {   mut dispatch_prompt_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = dispatch_prompt_rx.recv() => {
          debug!("Received DispatchPrompt");
          let dispatcher = dispatcher.clone();
          tokio::spawn(async move {
            let answer = dispatcher.dispatch(cmd.request).await;
            let _ = cmd.reply.send(answer);
          });
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("AiService shutting down");
          break;
        }
      }
    }
}
