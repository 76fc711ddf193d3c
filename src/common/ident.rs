//! C identifier helpers for generated headers

/// Check whether `name` is a valid C/C++ identifier.
///
/// # Examples
///
/// ```ignore
/// assert!(is_c_identifier("cryptonight_cl"));
/// assert!(!is_c_identifier("2fast"));
/// ```
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// C and C++ keywords, sorted
const RESERVED_WORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char16_t", "char32_t", "char8_t", "class", "co_await", "co_return",
    "co_yield", "compl", "concept", "const", "const_cast", "consteval", "constexpr", "constinit",
    "continue", "decltype", "default", "delete", "do", "double", "dynamic_cast", "else", "enum",
    "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if", "inline",
    "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr",
    "operator", "or", "or_eq", "private", "protected", "public", "register", "reinterpret_cast",
    "requires", "restrict", "return", "short", "signed", "sizeof", "static", "static_assert",
    "static_cast", "struct", "switch", "template", "this", "thread_local", "throw", "true", "try",
    "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual", "void", "volatile",
    "wchar_t", "while", "xor", "xor_eq",
];

/// Check whether `name` is a C or C++ keyword
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.binary_search(&name).is_ok()
}

/// Build an include guard macro name from its parts.
///
/// Each part is upper-cased and every character that cannot appear in an
/// identifier becomes `_`. Runs of `_` are collapsed, and a guard that would
/// start with a digit gets a leading `_`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(guard_name(&["xlarig", "randomx_cl"]), "XLARIG_RANDOMX_CL_H");
/// assert_eq!(guard_name(&["a::b", "k-cl"]), "A_B_K_CL_H");
/// ```
pub fn guard_name(parts: &[&str]) -> String {
    let raw: String = parts
        .iter()
        .chain(std::iter::once(&"h"))
        .map(|part| {
            part.chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() {
                        c.to_ascii_uppercase()
                    } else {
                        '_'
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_");

    let guard = raw
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if guard.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{guard}")
    } else {
        guard
    }
}
