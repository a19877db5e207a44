/// The interactive UI has exactly two states. The only transition is the
/// tab-switch key; everything else dispatches within the active tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Chat,
    Context,
}

impl Tab {
    pub fn toggle(self) -> Tab {
        match self {
            Tab::Chat => Tab::Context,
            Tab::Context => Tab::Chat,
        }
    }
}

/// Which panel of the context tab receives selection keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Browser,
    Staged,
}
