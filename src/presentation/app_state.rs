// Application state driven by the command loop
use crate::application::history_store::HistoryStore;
use crate::application::session::CalculatorSession;

pub struct AppState {
    pub session: CalculatorSession,
    pub history: HistoryStore,
}
