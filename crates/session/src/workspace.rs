//! Multi-tab sheet workspace
//!
//! Owns the open character tabs, routes every edit through a per-tab
//! consistency checker, and autosaves the whole set under one storage key.
//! The workspace always has at least one tab and always has an active one.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use standsheet_domain::{sanitize_character, Character, GameContent};

use crate::autosave::{AutosavePolicy, AutosaveState, SaveStatus};
use crate::consistency::{CheckerStats, StateConsistencyChecker};
use crate::error::SessionError;
use crate::ports::ClockPort;
use crate::storage::SafeStore;

/// Storage key the tab set persists under.
pub const DEFAULT_STORAGE_KEY: &str = "characterTabs";

const DEFAULT_TAB_NAME: &str = "New Character";

/// Identifier for one open tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One open character sheet plus its recovery state.
pub struct SheetTab {
    id: TabId,
    name: String,
    character: Character,
    checker: StateConsistencyChecker,
}

impl SheetTab {
    fn fresh(name: impl Into<String>, content: Option<Arc<GameContent>>) -> Self {
        Self {
            id: TabId::new(),
            name: name.into(),
            character: Character::new(),
            checker: configured_checker(content),
        }
    }

    /// Installs `sheet` as this tab's state and the checker's new anchor.
    fn adopt(&mut self, sheet: Character) -> Character {
        self.checker.reset();
        let adopted = self.checker.check(&sheet.to_value());
        self.character = adopted.clone();
        adopted
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Diagnostics from this tab's consistency checker.
    pub fn stats(&self) -> CheckerStats {
        self.checker.stats()
    }
}

fn configured_checker(content: Option<Arc<GameContent>>) -> StateConsistencyChecker {
    match content {
        Some(content) => StateConsistencyChecker::new().with_content(content),
        None => StateConsistencyChecker::new(),
    }
}

// Wire shape of one persisted tab. The sheet is kept as raw JSON so one
// mangled tab cannot take the rest of the workspace down with it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PersistedTab {
    id: TabId,
    name: String,
    character: Value,
}

impl Default for PersistedTab {
    fn default() -> Self {
        Self {
            id: TabId::new(),
            name: DEFAULT_TAB_NAME.to_string(),
            character: Value::Null,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PersistedWorkspace {
    tabs: Vec<PersistedTab>,
    active_tab: Option<TabId>,
}

/// The set of open sheets, with persistence and autosave.
pub struct SheetWorkspace {
    store: SafeStore,
    clock: Arc<dyn ClockPort>,
    storage_key: String,
    content: Option<Arc<GameContent>>,
    policy: AutosavePolicy,
    tabs: Vec<SheetTab>,
    active: TabId,
    autosave: AutosaveState,
}

impl SheetWorkspace {
    /// Creates a workspace holding one fresh tab.
    pub fn new(store: SafeStore, clock: Arc<dyn ClockPort>) -> Self {
        let tab = SheetTab::fresh(DEFAULT_TAB_NAME, None);
        let policy = AutosavePolicy::default();
        Self {
            store,
            clock,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            content: None,
            policy,
            active: tab.id(),
            tabs: vec![tab],
            autosave: AutosaveState::new(policy),
        }
    }

    /// Persists under a different storage key. Configure before use.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Threads a content pack into every tab's checker. Configure before
    /// editing: existing tabs get a rebuilt (empty) checker.
    pub fn with_content(mut self, content: Arc<GameContent>) -> Self {
        self.content = Some(content.clone());
        for tab in &mut self.tabs {
            tab.checker = configured_checker(Some(content.clone()));
        }
        self
    }

    /// Overrides the autosave timing. Configure before editing.
    pub fn with_policy(mut self, policy: AutosavePolicy) -> Self {
        self.policy = policy;
        self.autosave = AutosaveState::new(policy);
        self
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    pub fn tabs(&self) -> &[SheetTab] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&SheetTab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    fn tab_mut(&mut self, id: TabId) -> Option<&mut SheetTab> {
        self.tabs.iter_mut().find(|tab| tab.id == id)
    }

    pub fn active_tab_id(&self) -> TabId {
        self.active
    }

    pub fn active(&self) -> Option<&SheetTab> {
        self.tab(self.active)
    }

    fn active_mut(&mut self) -> Option<&mut SheetTab> {
        let active = self.active;
        self.tab_mut(active)
    }

    /// Opens a fresh tab and makes it active.
    pub fn open_tab(&mut self, name: impl Into<String>) -> TabId {
        let tab = SheetTab::fresh(name, self.content.clone());
        let id = tab.id();
        self.tabs.push(tab);
        self.active = id;
        self.autosave.touch(self.clock.now());
        id
    }

    /// Closes a tab. The last remaining tab is refused so its sheet is
    /// never discarded; closing the active tab activates its neighbor.
    pub fn close_tab(&mut self, id: TabId) -> Result<(), SessionError> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.id == id)
            .ok_or(SessionError::UnknownTab(id))?;
        if self.tabs.len() == 1 {
            return Err(SessionError::LastTab);
        }
        self.tabs.remove(index);

        if self.active == id {
            let neighbor = index.min(self.tabs.len() - 1);
            if let Some(tab) = self.tabs.get(neighbor) {
                self.active = tab.id();
            }
        }

        self.autosave.touch(self.clock.now());
        Ok(())
    }

    pub fn activate(&mut self, id: TabId) -> Result<(), SessionError> {
        if self.tab(id).is_none() {
            return Err(SessionError::UnknownTab(id));
        }
        self.active = id;
        self.autosave.touch(self.clock.now());
        Ok(())
    }

    pub fn rename_tab(&mut self, id: TabId, name: impl Into<String>) -> Result<(), SessionError> {
        let now = self.clock.now();
        let tab = self.tab_mut(id).ok_or(SessionError::UnknownTab(id))?;
        tab.name = name.into();
        self.autosave.touch(now);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    /// Applies one sheet update to a tab through its consistency checker
    /// and returns the state the tab now holds.
    pub fn apply(&mut self, id: TabId, candidate: &Value) -> Result<Character, SessionError> {
        let now = self.clock.now();
        let tab = self.tab_mut(id).ok_or(SessionError::UnknownTab(id))?;
        let sheet = tab.checker.check(candidate);
        tab.character = sheet.clone();
        self.autosave.touch(now);
        Ok(sheet)
    }

    /// Imports sheet text into the active tab. The text must be JSON; its
    /// content is sanitized and becomes the tab's new rollback anchor.
    pub fn import_active(&mut self, text: &str) -> Result<Character, SessionError> {
        let raw: Value = serde_json::from_str(text)?;
        let sheet = sanitize_character(&raw);
        let now = self.clock.now();
        let tab = self.active_mut().ok_or(SessionError::NoActiveTab)?;
        let adopted = tab.adopt(sheet);
        self.autosave.touch(now);
        Ok(adopted)
    }

    /// Exports the active tab's sheet as pretty-printed JSON.
    pub fn export_active(&self) -> Result<String, SessionError> {
        let tab = self.active().ok_or(SessionError::NoActiveTab)?;
        Ok(serde_json::to_string_pretty(&tab.character)?)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Current save-status notice (expires on its own).
    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status(self.clock.now())
    }

    /// Runs one autosave turn: saves if the quiet window has elapsed.
    /// Returns whether the save succeeded, or `None` if none was due.
    pub fn tick(&mut self) -> Option<bool> {
        let now = self.clock.now();
        if !self.autosave.due(now) {
            return None;
        }
        let ok = self.persist();
        if ok {
            self.autosave.mark_saved(now);
        } else {
            self.autosave.mark_failed(now);
        }
        Some(ok)
    }

    /// Persists immediately, regardless of the debounce window.
    pub fn save_now(&mut self) -> bool {
        let now = self.clock.now();
        let ok = self.persist();
        if ok {
            self.autosave.mark_saved(now);
        } else {
            self.autosave.mark_failed(now);
        }
        ok
    }

    /// Replaces the workspace contents with whatever storage holds and
    /// returns the number of open tabs afterwards.
    ///
    /// Every persisted sheet is sanitized on the way in, and each tab's
    /// checker is anchored on the result so the first bad edit rolls back.
    /// Corrupt storage yields a single fresh tab.
    pub fn load(&mut self) -> usize {
        let persisted: PersistedWorkspace = self
            .store
            .load_or(&self.storage_key, PersistedWorkspace::default());

        self.tabs = persisted
            .tabs
            .into_iter()
            .map(|tab| {
                let mut open = SheetTab {
                    id: tab.id,
                    name: tab.name,
                    character: Character::new(),
                    checker: configured_checker(self.content.clone()),
                };
                open.adopt(sanitize_character(&tab.character));
                open
            })
            .collect();

        if self.tabs.is_empty() {
            self.tabs
                .push(SheetTab::fresh(DEFAULT_TAB_NAME, self.content.clone()));
        }

        self.active = persisted
            .active_tab
            .filter(|id| self.tab(*id).is_some())
            .or_else(|| self.tabs.first().map(SheetTab::id))
            .unwrap_or_default();

        self.autosave = AutosaveState::new(self.policy);
        self.tabs.len()
    }

    fn persist(&self) -> bool {
        let persisted = PersistedWorkspace {
            tabs: self
                .tabs
                .iter()
                .map(|tab| PersistedTab {
                    id: tab.id,
                    name: tab.name.clone(),
                    character: tab.character.to_value(),
                })
                .collect(),
            active_tab: Some(self.active),
        };
        self.store.save(&self.storage_key, &persisted)
    }
}

// ============================================================================
// Tests
// ============================================================================
