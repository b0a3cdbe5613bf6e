pub fn pagination_max_limit() -> &'static Option<u32> {
    use std::sync::OnceLock;
    static KEYSEEK_MAX_LIMIT: OnceLock<Option<u32>> = OnceLock::new();
    KEYSEEK_MAX_LIMIT.get_or_init(|| {
        std::env::var("KEYSEEK_MAX_LIMIT").ok().map(|limit| {
            limit
                .parse::<u32>()
                .expect("KEYSEEK_MAX_LIMIT environment variable must be a semi-positive integer")
        })
    })
}
