//! Host-side header view: owns the active copier and installs or removes the
//! reordering wrapper.

use tracing::info;

use crate::config::HeadersConfig;
use crate::error::Result;
use crate::model::header::{DisplayStyle, HeaderOrder};
use crate::model::region::Region;

use super::legacy::LegacyCopier;
use super::reorder::Reorderer;
use super::{CopyRequest, HeaderCopier};

enum ActiveCopier {
    Legacy(LegacyCopier),
    Reordering(Reorderer<LegacyCopier>),
}

/// Renders message headers for display.
///
/// Starts with the legacy copier in place. [`HeaderView::install_reorder`]
/// wraps it; [`HeaderView::remove_reorder`] unwraps it again, leaving the
/// legacy copier exactly as it was.
pub struct HeaderView {
    copier: ActiveCopier,
}

impl HeaderView {
    pub fn new(legacy: LegacyCopier) -> Self {
        Self {
            copier: ActiveCopier::Legacy(legacy),
        }
    }

    /// Build a view from the `[headers]` config section, with the reorder
    /// wrapper installed using the configured order.
    pub fn from_config(config: &HeadersConfig) -> Self {
        let mut view = Self::new(LegacyCopier::from_config(config));
        view.install_reorder(config.order.clone());
        view
    }

    /// Wrap the legacy copier, or replace the order if already wrapped.
    pub fn install_reorder(&mut self, order: HeaderOrder) {
        info!(order = %order, "Installing header reordering");
        self.copier = match self.take() {
            ActiveCopier::Legacy(legacy) => ActiveCopier::Reordering(Reorderer::new(legacy, order)),
            ActiveCopier::Reordering(mut reorderer) => {
                reorderer.set_order(order);
                ActiveCopier::Reordering(reorderer)
            }
        };
    }

    /// Unwrap back to the legacy copier. Does nothing if not wrapped.
    pub fn remove_reorder(&mut self) {
        self.copier = match self.take() {
            ActiveCopier::Reordering(reorderer) => {
                info!("Removing header reordering");
                ActiveCopier::Legacy(reorderer.into_inner())
            }
            legacy => legacy,
        };
    }

    pub fn is_reordering(&self) -> bool {
        matches!(self.copier, ActiveCopier::Reordering(_))
    }

    /// The installed order, if the wrapper is in place.
    pub fn order(&self) -> Option<&HeaderOrder> {
        match &self.copier {
            ActiveCopier::Reordering(reorderer) => Some(reorderer.order()),
            ActiveCopier::Legacy(_) => None,
        }
    }

    pub fn legacy(&self) -> &LegacyCopier {
        match &self.copier {
            ActiveCopier::Legacy(legacy) => legacy,
            ActiveCopier::Reordering(reorderer) => reorderer.inner(),
        }
    }

    /// Render the headers of the message at `region` into a new string.
    pub fn render(
        &self,
        source: &str,
        region: Region,
        style: DisplayStyle,
        ignored_headers: Option<&[String]>,
    ) -> Result<String> {
        let mut request = CopyRequest::new(source, region).with_style(style);
        request.ignored_headers = ignored_headers;
        let mut dest = String::new();
        self.copy_headers(&request, &mut dest)?;
        Ok(dest)
    }

    fn take(&mut self) -> ActiveCopier {
        std::mem::replace(
            &mut self.copier,
            ActiveCopier::Legacy(LegacyCopier::new(Vec::new(), Vec::new())),
        )
    }
}

impl HeaderCopier for HeaderView {
    fn copy_headers(&self, request: &CopyRequest<'_>, dest: &mut String) -> Result<()> {
        match &self.copier {
            ActiveCopier::Legacy(legacy) => legacy.copy_headers(request, dest),
            ActiveCopier::Reordering(reorderer) => reorderer.copy_headers(request, dest),
        }
    }
}
