pub const DEFAULT_DELIMITERS: &[char] = &[' ', '\t'];

pub fn tokenize(input: &str, delimiters: &[char]) -> Vec<String> {
    input
        .split(|c: char| delimiters.contains(&c))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
