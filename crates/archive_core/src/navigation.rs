//! Navigation state for the archive views.
//!
//! `ViewStore` owns the current [`ViewState`], applies navigation rules on
//! update, notifies listeners, and mirrors the state into a URL-fragment
//! style string (`page=archive&gen=Rookie&p=2`).

use serde::{Deserialize, Serialize};

use crate::catalog::ALL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Landing,
    Archive,
    Detail,
    Planner,
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::Archive => "archive",
            Page::Detail => "detail",
            Page::Planner => "planner",
        }
    }

    /// Unknown names map to the landing page.
    pub fn parse(value: &str) -> Self {
        match value {
            "archive" => Page::Archive,
            "detail" => Page::Detail,
            "planner" => Page::Planner,
            _ => Page::Landing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub page: Page,
    pub generation: String,
    pub attribute: String,
    pub search: String,
    /// 1-based catalog page.
    pub page_number: usize,
    /// Selected creature on the detail page.
    pub name: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: Page::Landing,
            generation: ALL.to_string(),
            attribute: ALL.to_string(),
            search: String::new(),
            page_number: 1,
            name: None,
        }
    }
}

impl ViewState {
    /// Parses `key=value&...`, with or without a leading `#`. Missing keys
    /// take their defaults; a non-numeric `p` reads as page 1.
    pub fn from_fragment(fragment: &str) -> Self {
        let mut state = Self::default();
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        for pair in fragment.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value);
            match key {
                "page" => state.page = Page::parse(&value),
                "gen" if !value.is_empty() => state.generation = value,
                "attr" if !value.is_empty() => state.attribute = value,
                "q" => state.search = value,
                "p" => state.page_number = value.parse().unwrap_or(1),
                "name" if !value.is_empty() => state.name = Some(value),
                _ => {}
            }
        }
        state
    }

    /// Landing serializes to an empty fragment. Archive keeps only the
    /// filters that differ from their defaults; detail keeps the name.
    pub fn to_fragment(&self) -> String {
        if self.page == Page::Landing {
            return String::new();
        }
        let mut params = vec![("page", self.page.as_str().to_string())];
        match self.page {
            Page::Archive => {
                if self.generation != ALL {
                    params.push(("gen", self.generation.clone()));
                }
                if self.attribute != ALL {
                    params.push(("attr", self.attribute.clone()));
                }
                if !self.search.is_empty() {
                    params.push(("q", self.search.clone()));
                }
                if self.page_number != 1 {
                    params.push(("p", self.page_number.to_string()));
                }
            }
            Page::Detail => {
                if let Some(name) = &self.name {
                    params.push(("name", name.clone()));
                }
            }
            Page::Landing | Page::Planner => {}
        }
        params
            .into_iter()
            .map(|(k, v)| format!("{k}={}", encode_component(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Partial update applied by [`ViewStore::navigate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub page: Option<Page>,
    pub generation: Option<String>,
    pub attribute: Option<String>,
    pub search: Option<String>,
    pub page_number: Option<usize>,
    pub name: Option<Option<String>>,
}

impl ViewUpdate {
    pub fn page(page: Page) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn detail(name: &str) -> Self {
        Self {
            page: Some(Page::Detail),
            name: Some(Some(name.to_string())),
            ..Self::default()
        }
    }

    /// New search term; always returns to the first page.
    pub fn search(term: &str) -> Self {
        Self {
            search: Some(term.to_string()),
            page_number: Some(1),
            ..Self::default()
        }
    }
}

/// Replaces every field, so navigating with it behaves like opening `state`
/// fresh (subject to the same page rules).
impl From<ViewState> for ViewUpdate {
    fn from(state: ViewState) -> Self {
        Self {
            page: Some(state.page),
            generation: Some(state.generation),
            attribute: Some(state.attribute),
            search: Some(state.search),
            page_number: Some(state.page_number),
            name: Some(state.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ViewState) + Send>;

#[derive(Default)]
pub struct ViewStore {
    state: ViewState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl ViewStore {
    pub fn new(state: ViewState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn from_fragment(fragment: &str) -> Self {
        Self::new(ViewState::from_fragment(fragment))
    }

    pub fn current_view(&self) -> &ViewState {
        &self.state
    }

    pub fn fragment(&self) -> String {
        self.state.to_fragment()
    }

    /// Applies `update`, then notifies every listener with the new state.
    ///
    /// Going to the landing page resets everything; going to the archive
    /// drops the selected name.
    pub fn navigate(&mut self, update: ViewUpdate) {
        let mut next = self.state.clone();
        if let Some(page) = update.page {
            next.page = page;
        }
        if let Some(generation) = update.generation {
            next.generation = generation;
        }
        if let Some(attribute) = update.attribute {
            next.attribute = attribute;
        }
        if let Some(search) = update.search {
            next.search = search;
        }
        if let Some(page_number) = update.page_number {
            next.page_number = page_number;
        }
        if let Some(name) = update.name {
            next.name = name;
        }
        match next.page {
            Page::Landing => next = ViewState::default(),
            Page::Archive => next.name = None,
            Page::Detail | Page::Planner => {}
        }
        self.state = next;
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    pub fn on_change(&mut self, listener: impl FnMut(&ViewState) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }
}

fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(char::from(byte));
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode_component(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => match bytes.get(i + 1..i + 3).and_then(decode_hex_pair) {
                Some(decoded) => {
                    out.push(decoded);
                    i += 2;
                }
                None => out.push(b'%'),
            },
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn decode_hex_pair(pair: &[u8]) -> Option<u8> {
    if !pair.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(pair).ok()?;
    u8::from_str_radix(hex, 16).ok()
}
