use std::time::Duration;

use rasa_chat_actor::{Actor, Message as ActorMessage};
use rasa_chat_model::{BotReply, UserUtterance};

use super::animator::Tick;
use super::{CONNECTION_APOLOGY, CONNECTION_ERROR, ChatState, FALLBACK_REPLY};
use crate::conversation::Message;
use crate::reply_client::ReplyError;
use crate::view::ChatView;

impl ChatState {
    fn send_utterance(&mut self, text: String, handle: &Actor<Self>) {
        self.conversation.push(Message::user(text.clone()));
        self.last_error = None;
        self.in_flight += 1;
        // Publish before the request goes out, so the user message is on
        // screen no matter how fast the bot answers.
        self.publish();

        let utterance = UserUtterance::new(self.sender_id.clone(), text);
        let reply_client = self.reply_client.clone();
        let handle_clone = handle.clone();
        self.spawn_task(
            async move {
                let result = reply_client.send_message(utterance).await;
                handle_clone.send(RepliesReceived(result)).ok();
            },
            handle,
        );
    }

    fn receive_replies(
        &mut self,
        result: Result<Vec<BotReply>, ReplyError>,
        handle: &Actor<Self>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(replies) => {
                let batch: Vec<_> = if replies.is_empty() {
                    debug!("bot sent no replies, using the fallback");
                    vec![Message::bot(FALLBACK_REPLY)]
                } else {
                    replies.into_iter().map(Message::from_reply).collect()
                };
                debug!("queueing {} bot messages", batch.len());
                if self.animator.enqueue(batch) {
                    self.advance_typing(handle);
                }
            }
            Err(err) => {
                warn!("send failed, showing an error message: {err}");
                // Errors skip the animator entirely.
                self.stop_typing();
                self.conversation.push(Message::error(CONNECTION_APOLOGY));
                self.last_error = Some(CONNECTION_ERROR.to_owned());
            }
        }
        self.publish();
    }

    fn advance_typing(&mut self, handle: &Actor<Self>) {
        match self.animator.tick() {
            Tick::Revealed(delay) => self.arm_timer(delay, handle),
            Tick::Finished { message, next } => {
                trace!("committing a typed message");
                self.conversation.push(message);
                if let Some(delay) = next {
                    self.arm_timer(delay, handle);
                }
            }
            Tick::Idle => {}
        }
    }

    fn arm_timer(&mut self, delay: Duration, handle: &Actor<Self>) {
        self.cancel_timer();
        let generation = self.timer_generation;
        self.typing_timer = Some(handle.send_after(TypingTick { generation }, delay));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.typing_timer.take() {
            timer.cancel();
        }
        // A tick that already reached the mailbox now carries a stale
        // generation and will be ignored.
        self.timer_generation += 1;
    }

    fn stop_typing(&mut self) {
        self.cancel_timer();
        if self.animator.cancel() {
            debug!("typing cancelled");
        }
    }

    fn clear(&mut self) {
        self.conversation.clear();
        self.stop_typing();
        self.publish();
    }

    fn shutdown(&mut self, handle: &Actor<Self>) {
        self.stop_typing();
        for (_, task) in self.running_tasks.drain() {
            task.abort();
        }
        self.in_flight = 0;
        self.publish();
        handle.try_kill();
    }

    fn publish(&self) {
        let view = ChatView {
            messages: self.conversation.clone(),
            loading: self.in_flight > 0,
            last_error: self.last_error.clone(),
            is_bot_typing: self.animator.is_typing(),
            typing_text: self.animator.typing_text().to_owned(),
        };
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                return false;
            }
            *current = view;
            true
        });
    }

    fn spawn_task<Fut>(&mut self, fut: Fut, handle: &Actor<Self>)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let handle = handle.clone();
        let task = tokio::spawn(async move {
            fut.await;
            handle.send(TaskEnded(task_id)).ok();
        });
        self.running_tasks.insert(task_id, task);
    }
}

#[derive(Debug)]
pub struct SendUtterance(pub String);

impl ActorMessage<ChatState> for SendUtterance {
    fn handle(self, state: &mut ChatState, handle: &Actor<ChatState>) {
        state.send_utterance(self.0, handle);
    }
}

#[derive(Debug)]
pub struct ClearChat;

impl ActorMessage<ChatState> for ClearChat {
    #[inline]
    fn handle(self, state: &mut ChatState, _handle: &Actor<ChatState>) {
        state.clear();
    }
}

#[derive(Debug)]
pub struct Shutdown;

impl ActorMessage<ChatState> for Shutdown {
    #[inline]
    fn handle(self, state: &mut ChatState, handle: &Actor<ChatState>) {
        state.shutdown(handle);
    }
}

#[derive(Debug)]
struct RepliesReceived(Result<Vec<BotReply>, ReplyError>);

impl ActorMessage<ChatState> for RepliesReceived {
    fn handle(self, state: &mut ChatState, handle: &Actor<ChatState>) {
        state.receive_replies(self.0, handle);
    }
}

#[derive(Debug)]
struct TypingTick {
    generation: u64,
}

impl ActorMessage<ChatState> for TypingTick {
    fn handle(self, state: &mut ChatState, handle: &Actor<ChatState>) {
        if self.generation != state.timer_generation {
            trace!("dropping a stale typing tick");
            return;
        }
        state.typing_timer = None;
        state.advance_typing(handle);
        state.publish();
    }
}

#[derive(Debug)]
struct TaskEnded(u64);

impl ActorMessage<ChatState> for TaskEnded {
    #[inline]
    fn handle(self, state: &mut ChatState, _handle: &Actor<ChatState>) {
        if state.running_tasks.remove(&self.0).is_none() {
            trace!("task {} was already forgotten", self.0);
        }
    }
}
