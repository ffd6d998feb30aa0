//! Host model-change notifications.

use std::fmt;

/// A model change the host reports through an add-in callback.
///
/// Every kind invalidates the element cache; none of them carries enough
/// detail to patch the cache in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelEvent {
    FileOpen,
    FileNew,
    FileClose,
    PostNewPackage,
    PostNewElement,
    PostNewConnector,
    PostNewAttribute,
    PostNewDiagram,
    PreDeletePackage,
    PreDeleteElement,
    PreDeleteConnector,
    PreDeleteAttribute,
    PreDeleteDiagram,
    ContextItemModified,
}

impl ModelEvent {
    pub const ALL: [ModelEvent; 14] = [
        ModelEvent::FileOpen,
        ModelEvent::FileNew,
        ModelEvent::FileClose,
        ModelEvent::PostNewPackage,
        ModelEvent::PostNewElement,
        ModelEvent::PostNewConnector,
        ModelEvent::PostNewAttribute,
        ModelEvent::PostNewDiagram,
        ModelEvent::PreDeletePackage,
        ModelEvent::PreDeleteElement,
        ModelEvent::PreDeleteConnector,
        ModelEvent::PreDeleteAttribute,
        ModelEvent::PreDeleteDiagram,
        ModelEvent::ContextItemModified,
    ];

    /// Name of the host callback that reports this event.
    pub fn callback_name(self) -> &'static str {
        match self {
            ModelEvent::FileOpen => "EA_FileOpen",
            ModelEvent::FileNew => "EA_FileNew",
            ModelEvent::FileClose => "EA_FileClose",
            ModelEvent::PostNewPackage => "EA_OnPostNewPackage",
            ModelEvent::PostNewElement => "EA_OnPostNewElement",
            ModelEvent::PostNewConnector => "EA_OnPostNewConnector",
            ModelEvent::PostNewAttribute => "EA_OnPostNewAttribute",
            ModelEvent::PostNewDiagram => "EA_OnPostNewDiagram",
            ModelEvent::PreDeletePackage => "EA_OnPreDeletePackage",
            ModelEvent::PreDeleteElement => "EA_OnPreDeleteElement",
            ModelEvent::PreDeleteConnector => "EA_OnPreDeleteConnector",
            ModelEvent::PreDeleteAttribute => "EA_OnPreDeleteAttribute",
            ModelEvent::PreDeleteDiagram => "EA_OnPreDeleteDiagram",
            ModelEvent::ContextItemModified => "EA_OnNotifyContextItemModified",
        }
    }

    /// Map a host callback name back to its event. Case-sensitive, like the
    /// host's own dispatch.
    pub fn from_callback_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.callback_name() == name)
    }
}

impl fmt::Display for ModelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.callback_name())
    }
}
