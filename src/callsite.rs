use crate::frame::StackFrame;

/// Symbol-name prefixes that never count as an application call site:
/// the Rust runtime, the unwinding machinery and this crate itself.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "logbook::",
];

/// The function/file/line/class at which a logging call originated.
///
/// Every field is independently optional: a found frame always carries a
/// symbol name but may lack debug info for file and line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallSite {
    pub function: Option<String>,
    pub file_name: Option<String>,
    pub line_number: Option<u32>,
    pub class_name: Option<String>,
}

/// One resolved symbol from the live stack, before call-site selection.
struct FrameSymbol {
    name: String,
    file_name: Option<String>,
    line_number: Option<u32>,
}

/// Walk the calling thread's own stack, innermost first, and return the
/// first frame whose symbol name does not start with any of
/// `excluded_prefixes`.
///
/// Read-only and total: an exhausted or fully excluded stack yields
/// `None`, never an error. Symbol resolution depends on debug info, so a
/// release build without symbols can also come up empty.
pub fn resolve(excluded_prefixes: &[&str]) -> Option<CallSite> {
    let mut found: Option<CallSite> = None;

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if found.is_some() {
                return;
            }
            let Some(name) = symbol.name().map(|n| n.to_string()) else {
                return;
            };
            let symbol = FrameSymbol {
                name,
                file_name: symbol.filename().map(|p| p.display().to_string()),
                line_number: symbol.lineno(),
            };
            found = accept(&symbol, excluded_prefixes);
        });
        found.is_none()
    });

    if found.is_none() {
        tracing::debug!("no call site found outside excluded prefixes");
    }
    found
}

/// Capture the current stack as portable frames, innermost first, with the
/// unwinding machinery and this crate's own frames stripped from the top.
pub(crate) fn capture_frames() -> Vec<StackFrame> {
    let mut symbols = Vec::new();
    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if let Some(name) = symbol.name().map(|n| n.to_string()) {
                symbols.push(FrameSymbol {
                    name,
                    file_name: symbol.filename().map(|p| p.display().to_string()),
                    line_number: symbol.lineno(),
                });
            }
        });
        true
    });

    symbols
        .iter()
        .skip_while(|s| is_excluded(&s.name, &["backtrace::", "logbook::"]))
        .map(to_frame)
        .collect()
}

fn accept(symbol: &FrameSymbol, excluded_prefixes: &[&str]) -> Option<CallSite> {
    if is_excluded(&symbol.name, excluded_prefixes) {
        return None;
    }
    let (class_name, function) = split_symbol(&symbol.name);
    Some(CallSite {
        function: Some(function),
        file_name: symbol.file_name.clone(),
        line_number: symbol.line_number,
        class_name,
    })
}

fn to_frame(symbol: &FrameSymbol) -> StackFrame {
    let (class_name, method_name) = split_symbol(&symbol.name);
    StackFrame {
        class_name: class_name.unwrap_or_default(),
        method_name,
        file_name: symbol.file_name.clone(),
        line_number: symbol.line_number,
    }
}

fn is_excluded(name: &str, excluded_prefixes: &[&str]) -> bool {
    excluded_prefixes.iter().any(|p| name.starts_with(p))
}

/// Split a demangled symbol into declaring unit and bare function name,
/// dropping the trailing `::h<hash>` disambiguator when present.
fn split_symbol(name: &str) -> (Option<String>, String) {
    let name = strip_hash(name);
    match name.rfind("::") {
        Some(idx) => (Some(name[..idx].to_string()), name[idx + 2..].to_string()),
        None => (None, name.to_string()),
    }
}

fn strip_hash(name: &str) -> &str {
    if let Some(idx) = name.rfind("::h") {
        let tail = &name[idx + 3..];
        if tail.len() == 16 && tail.bytes().all(|b| b.is_ascii_hexdigit()) {
            return &name[..idx];
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str) -> FrameSymbol {
        FrameSymbol {
            name: name.to_string(),
            file_name: Some(format!("{}.rs", name.split("::").next().unwrap())),
            line_number: Some(10),
        }
    }

    fn first_call_site<'a>(
        symbols: impl IntoIterator<Item = &'a FrameSymbol>,
        excluded: &[&str],
    ) -> Option<CallSite> {
        symbols.into_iter().find_map(|s| accept(s, excluded))
    }

    #[test]
    fn skips_excluded_frames() {
        let stack = [
            symbol("std::panicking::catch"),
            symbol("logbook::record::build"),
            symbol("myapp::net::fetch"),
            symbol("myapp::main"),
        ];
        let site = first_call_site(stack.iter(), DEFAULT_EXCLUDED_PREFIXES).unwrap();
        assert_eq!(site.function.as_deref(), Some("fetch"));
        assert_eq!(site.class_name.as_deref(), Some("myapp::net"));
        assert_eq!(site.file_name.as_deref(), Some("myapp.rs"));
        assert_eq!(site.line_number, Some(10));
    }

    #[test]
    fn fully_excluded_stack_yields_none() {
        let stack = [
            symbol("std::rt::lang_start"),
            symbol("core::ops::function::FnOnce::call_once"),
            symbol("logbook::record::build"),
        ];
        assert_eq!(
            first_call_site(stack.iter(), DEFAULT_EXCLUDED_PREFIXES),
            None
        );
    }

    #[test]
    fn splits_symbol_and_strips_hash() {
        let (class, function) = split_symbol("myapp::net::fetch::h0123456789abcdef");
        assert_eq!(class.as_deref(), Some("myapp::net"));
        assert_eq!(function, "fetch");
    }

    #[test]
    fn bare_symbol_has_no_declaring_unit() {
        let (class, function) = split_symbol("main");
        assert_eq!(class, None);
        assert_eq!(function, "main");
    }

    #[test]
    fn live_resolve_is_total() {
        // Whatever the build settings, resolving must not panic; with every
        // prefix excluded it must come up empty.
        let everything = ["".to_string()];
        let refs: Vec<&str> = everything.iter().map(String::as_str).collect();
        assert_eq!(resolve(&refs), None);
    }
}
