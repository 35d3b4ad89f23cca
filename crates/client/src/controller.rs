//! Drives [`CatalogState`] against a [`CatalogApi`].

use crate::api::CatalogApi;
use crate::model::ProductResource;
use crate::state::{delete_failure_message, fetch_failure_message, CatalogState, Command, Msg};
use crate::view::{render, View};

/// Asks the user whether a product should really be deleted.
pub trait Confirm {
    fn confirm(&mut self, id: u64, product: Option<&ProductResource>) -> bool;
}

/// Confirms every delete.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _id: u64, _product: Option<&ProductResource>) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    Deleted(String),
    Failed(String),
}

pub struct CatalogClient<A> {
    api: A,
    state: CatalogState,
}

impl<A: CatalogApi> CatalogClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: CatalogState::new(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn view(&self) -> View {
        render(&self.state)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn mount(&mut self) {
        self.dispatch(Msg::Mount).await;
    }

    pub async fn change_page(&mut self, page: u64) {
        self.dispatch(Msg::ChangePage(page)).await;
    }

    pub async fn delete(&mut self, id: u64, confirm: &mut dyn Confirm) -> DeleteOutcome {
        if !confirm.confirm(id, self.state.find(id)) {
            tracing::info!(product = id, "delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        let result = match self.api.prepare_session().await {
            Ok(()) => self.api.delete(id).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(message) => {
                tracing::info!(product = id, "product deleted");
                self.dispatch(Msg::Deleted {
                    id,
                    message: message.clone(),
                })
                .await;
                DeleteOutcome::Deleted(message)
            }
            Err(err) => {
                tracing::warn!(product = id, error = %err, "delete failed");
                let message = delete_failure_message(&err);
                self.dispatch(Msg::DeleteFailed {
                    message: message.clone(),
                })
                .await;
                DeleteOutcome::Failed(message)
            }
        }
    }

    async fn dispatch(&mut self, msg: Msg) {
        let mut pending = Some(msg);
        while let Some(msg) = pending.take() {
            let (next, command) = std::mem::take(&mut self.state).update(msg);
            self.state = next;
            if let Some(command) = command {
                pending = Some(self.run(command).await);
            }
        }
    }

    async fn run(&self, command: Command) -> Msg {
        match command {
            Command::Fetch { page, generation } => match self.api.list(page).await {
                Ok(page) => Msg::FetchSucceeded { generation, page },
                Err(err) => {
                    tracing::warn!(page, error = %err, "fetching products failed");
                    Msg::FetchFailed {
                        generation,
                        message: fetch_failure_message(&err),
                    }
                }
            },
        }
    }
}
