use crate::breadcrumb::leaf_name;
use crate::facade::LogFacade;
use crate::site::CallSite;

/// Logs a UI component's appearance and disappearance through
/// [`LogFacade::info`], labelled with the component's source file name.
///
/// Hooking the events is left to the UI toolkit; call
/// [`on_appear`](Self::on_appear) / [`on_disappear`](Self::on_disappear)
/// from its callbacks, or hold a [`ViewGuard`] for the component's lifetime.
#[derive(Debug, Clone)]
pub struct ViewLogger {
    site: CallSite,
}

impl ViewLogger {
    pub fn new(site: CallSite) -> Self {
        ViewLogger { site }
    }

    pub fn site(&self) -> &CallSite {
        &self.site
    }

    pub fn label(&self) -> &str {
        leaf_name(&self.site.file)
    }

    pub fn on_appear(&self, facade: &LogFacade) {
        facade.info(&format_args!("{} OPENED>>>", self.label()), &self.site);
    }

    pub fn on_disappear(&self, facade: &LogFacade) {
        facade.info(&format_args!("{} CLOSED<<<", self.label()), &self.site);
    }

    /// Log the appearance now and the disappearance when the guard drops.
    pub fn enter(self, facade: &LogFacade) -> ViewGuard<'_> {
        self.on_appear(facade);
        ViewGuard {
            logger: self,
            facade,
        }
    }
}

/// Scope guard returned by [`ViewLogger::enter`].
#[must_use = "the view is logged as closed as soon as the guard is dropped"]
pub struct ViewGuard<'a> {
    logger: ViewLogger,
    facade: &'a LogFacade,
}

impl Drop for ViewGuard<'_> {
    fn drop(&mut self) {
        self.logger.on_disappear(self.facade);
    }
}

/// Build a [`ViewLogger`] for the current call site.
#[macro_export]
macro_rules! view_logger {
    () => {
        $crate::lifecycle::ViewLogger::new($crate::call_site!())
    };
}
