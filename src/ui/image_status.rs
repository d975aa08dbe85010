//! Load status of remote badge images

/// Status of one image load. `Loaded` and `Errored` are terminal until the
/// source changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageLoadStatus {
    #[default]
    Unloaded,
    Loaded,
    Errored,
}

/// What a view should show in place of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageDisplay {
    /// Still loading; show a skeleton or spinner
    Placeholder,
    /// Show the image at this URL
    Image(String),
    /// Show fallback text instead
    Fallback,
}

/// One image slot: its source URL and load status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlot {
    source: Option<String>,
    status: ImageLoadStatus,
}

impl ImageSlot {
    pub fn new(source: Option<&str>) -> Self {
        Self {
            source: source.filter(|s| !s.trim().is_empty()).map(str::to_string),
            status: ImageLoadStatus::Unloaded,
        }
    }

    /// Points the slot at a new source. Status resets to `Unloaded` only when
    /// the URL actually changes. Returns true when it did.
    pub fn set_source(&mut self, source: Option<&str>) -> bool {
        let source = source.filter(|s| !s.trim().is_empty());
        if self.source.as_deref() == source {
            return false;
        }
        self.source = source.map(str::to_string);
        self.status = ImageLoadStatus::Unloaded;
        true
    }

    pub fn mark_loaded(&mut self) {
        if self.status == ImageLoadStatus::Unloaded {
            self.status = ImageLoadStatus::Loaded;
        }
    }

    pub fn mark_errored(&mut self) {
        if self.status == ImageLoadStatus::Unloaded {
            self.status = ImageLoadStatus::Errored;
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn status(&self) -> ImageLoadStatus {
        self.status
    }

    /// True when a load should be started for the current source
    pub fn needs_load(&self) -> bool {
        self.source.is_some() && self.status == ImageLoadStatus::Unloaded
    }

    pub fn display(&self) -> ImageDisplay {
        match (&self.source, self.status) {
            (None, _) | (Some(_), ImageLoadStatus::Errored) => ImageDisplay::Fallback,
            (Some(_), ImageLoadStatus::Unloaded) => ImageDisplay::Placeholder,
            (Some(url), ImageLoadStatus::Loaded) => ImageDisplay::Image(url.clone()),
        }
    }
}
