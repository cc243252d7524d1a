use std::borrow::Cow;
use std::fmt;

/// Where a logging call originated.
///
/// Must be captured at the call expression, normally through
/// [`call_site!`](crate::call_site), so it names the caller rather than
/// the facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: Cow<'static, str>,
    pub function: Cow<'static, str>,
    pub line: u32,
    pub column: u32,
}

impl CallSite {
    pub fn new(
        file: impl Into<Cow<'static, str>>,
        function: impl Into<Cow<'static, str>>,
        line: u32,
        column: u32,
    ) -> Self {
        CallSite {
            file: file.into(),
            function: function.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{} ({})", self.file, self.line, self.column, self.function)
    }
}

/// Strip the helper item suffix left by [`function_name!`](crate::function_name).
#[doc(hidden)]
pub fn trim_function_path(raw: &'static str) -> &'static str {
    let mut name = raw.strip_suffix("::__here").unwrap_or(raw);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// Path of the enclosing function, e.g. `my_app::views::render`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::site::trim_function_path(__type_name_of(__here))
    }};
}

/// Capture a [`CallSite`] for the current expression.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::site::CallSite::new(
            ::std::file!(),
            $crate::function_name!(),
            ::std::line!(),
            ::std::column!(),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> CallSite {
        crate::call_site!()
    }

    #[test]
    fn captures_caller_location() {
        let site = capture();
        assert_eq!(site.file, file!());
        assert!(site.function.ends_with("tests::capture"), "{}", site.function);
        assert!(site.line > 0);
        assert!(site.column > 0);
    }

    #[test]
    fn closures_report_enclosing_function() {
        let site = (|| crate::call_site!())();
        assert!(
            site.function.ends_with("tests::closures_report_enclosing_function"),
            "{}",
            site.function
        );
    }

    #[test]
    fn trims_helper_suffix() {
        assert_eq!(trim_function_path("app::run::__here"), "app::run");
        assert_eq!(trim_function_path("app::run::{{closure}}::__here"), "app::run");
        assert_eq!(trim_function_path("app::run"), "app::run");
    }
}
