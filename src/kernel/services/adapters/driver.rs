//! Executes store effects against the collaborator ports.
//!
//! Every request is spawned on the injected executor and reports back by
//! sending a reply action over the session bus; nothing here blocks, and
//! in-flight requests are never aborted (their replies are ignored by the
//! reducers when stale).

use std::sync::Arc;

use crate::kernel::services::bus::SessionBusSender;
use crate::kernel::services::ports::{
    AsyncExecutor, CheckChannel, CheckRequest, CheckSubscription, CodeGenerator, Compiler,
    FileStore, SuggestRequest, SuggestionEngine,
};
use crate::kernel::{Action, Effect};

/// The collaborators a session is wired to.
pub struct SessionPorts {
    pub files: Arc<dyn FileStore>,
    pub check: Arc<dyn CheckChannel>,
    pub suggest: Arc<dyn SuggestionEngine>,
    pub compiler: Arc<dyn Compiler>,
    pub codegen: Arc<dyn CodeGenerator>,
}

pub struct EffectDriver {
    ports: SessionPorts,
    executor: Arc<dyn AsyncExecutor>,
    bus: SessionBusSender,
    // Held for its lifetime only: dropping the driver unsubscribes.
    _check_sub: Box<dyn CheckSubscription>,
}

impl EffectDriver {
    pub fn new(
        ports: SessionPorts,
        executor: Arc<dyn AsyncExecutor>,
        bus: SessionBusSender,
    ) -> Self {
        let check_sub = {
            let bus = bus.clone();
            ports.check.subscribe(Box::new(move |reply| {
                let _ = bus.send_action(Action::CheckArrived { reply });
            }))
        };
        Self {
            ports,
            executor,
            bus,
            _check_sub: check_sub,
        }
    }

    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::ListFiles => {
                let files = Arc::clone(&self.ports.files);
                let bus = self.bus.clone();
                self.executor.spawn(Box::pin(async move {
                    let result = files.list().await;
                    let _ = bus.send_action(Action::FilesListed { result });
                }));
            }
            Effect::FetchFile { filename } => {
                let files = Arc::clone(&self.ports.files);
                let bus = self.bus.clone();
                self.executor.spawn(Box::pin(async move {
                    let result = files.fetch(&filename).await;
                    let _ = bus.send_action(Action::FileFetched { filename, result });
                }));
            }
            Effect::CreateFile { filename } => {
                let files = Arc::clone(&self.ports.files);
                let bus = self.bus.clone();
                self.executor.spawn(Box::pin(async move {
                    // New files start empty; content arrives through save.
                    let result = files.create(&filename, "").await;
                    let _ = bus.send_action(Action::FileCreated { filename, result });
                }));
            }
            Effect::SaveFile { filename, content } => {
                let files = Arc::clone(&self.ports.files);
                let bus = self.bus.clone();
                self.executor.spawn(Box::pin(async move {
                    let result = files.update(&filename, &content).await;
                    let _ = bus.send_action(Action::FileSaved { filename, result });
                }));
            }
            Effect::DeleteFile { filename } => {
                let files = Arc::clone(&self.ports.files);
                let bus = self.bus.clone();
                self.executor.spawn(Box::pin(async move {
                    let result = files.remove(&filename).await;
                    let _ = bus.send_action(Action::FileDeleted { filename, result });
                }));
            }
            Effect::PublishCheck { content, language } => {
                // Fire-and-forget; the reply, if any, arrives through the
                // subscription.
                self.ports.check.publish(CheckRequest { content, language });
            }
            Effect::RequestSuggestions {
                request_id,
                content,
                offset,
                language,
            } => {
                let suggest = Arc::clone(&self.ports.suggest);
                let bus = self.bus.clone();
                self.executor.spawn(Box::pin(async move {
                    let result = suggest
                        .complete(SuggestRequest {
                            content,
                            offset,
                            language,
                        })
                        .await;
                    let _ = bus.send_action(Action::SuggestionsArrived { request_id, result });
                }));
            }
            Effect::Compile {
                request_id,
                content,
                language,
            } => {
                let compiler = Arc::clone(&self.ports.compiler);
                let bus = self.bus.clone();
                self.executor.spawn(Box::pin(async move {
                    let result = compiler.compile(&content, language).await;
                    let _ = bus.send_action(Action::CompileFinished { request_id, result });
                }));
            }
            Effect::Generate {
                request_id,
                task,
                language,
            } => {
                let codegen = Arc::clone(&self.ports.codegen);
                let bus = self.bus.clone();
                self.executor.spawn(Box::pin(async move {
                    let result = codegen.generate(&task, language).await;
                    let _ = bus.send_action(Action::GenerateFinished { request_id, result });
                }));
            }
            Effect::Debug {
                request_id,
                content,
                language,
            } => {
                let codegen = Arc::clone(&self.ports.codegen);
                let bus = self.bus.clone();
                self.executor.spawn(Box::pin(async move {
                    let result = codegen.debug(&content, language).await;
                    let _ = bus.send_action(Action::DebugFinished { request_id, result });
                }));
            }
            // Debounce bookkeeping belongs to the session controller.
            Effect::ScheduleCheck | Effect::CancelCheck => {
                tracing::warn!(target: "session.driver", "debounce effect reached the driver");
            }
        }
    }
}
