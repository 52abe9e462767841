#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr
        $(, buckets: $buckets:expr)?
        $(, phrases: [ $($phrase:expr),* $(,)? ])?
        , apply: |$input:ident, $config:ident| $body:block
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            buckets: { 0 $(| $buckets)? },
            phrases: &[ $($($phrase),*)? ],
            apply: |$input: &str, $config: &$crate::Config| -> Option<String> { $body },
        }
    }};
}
