use std::sync::Arc;

use crate::database::Database;
use crate::events::BroadcastDispatcher;
use crate::services::{MailService, NotificationService};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub notification_service: NotificationService,
    pub mail_service: MailService,
    pub dispatcher: Arc<dyn BroadcastDispatcher>,
}

impl AppState {
    pub fn new(
        db: Database,
        dispatcher: Arc<dyn BroadcastDispatcher>,
        mail_service: MailService,
    ) -> Self {
        let notification_service = NotificationService::new(db.clone(), dispatcher.clone());

        Self {
            db,
            notification_service,
            mail_service,
            dispatcher,
        }
    }
}
