//! Build script to generate embedded puzzle data
//!
//! Reads word lists, the Feudle sentence corpus and the Mathle equation list and
//! generates Rust source code with const arrays.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_word_list(
        "data/answers.txt",
        &Path::new(&out_dir).join("answers.rs"),
        "ANSWERS",
        "Five-letter words drawn as Wordle and Duordle targets",
    );

    generate_word_list(
        "data/allowed.txt",
        &Path::new(&out_dir).join("allowed.rs"),
        "ALLOWED",
        "Extra guessable five-letter words that are never drawn as targets",
    );

    generate_word_list(
        "data/equations.txt",
        &Path::new(&out_dir).join("equations.rs"),
        "EQUATIONS",
        "Balanced equations drawn as Mathle targets",
    );

    generate_sentence_corpus(
        "data/feudle.txt",
        &Path::new(&out_dir).join("feudle.rs"),
        "FEUDLE_SENTENCES",
    );

    println!("cargo:rerun-if-changed=data/answers.txt");
    println!("cargo:rerun-if-changed=data/allowed.txt");
    println!("cargo:rerun-if-changed=data/equations.txt");
    println!("cargo:rerun-if-changed=data/feudle.txt");
}

fn generate_word_list(input_path: &str, output_path: &Path, const_name: &str, doc_comment: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let words: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let count = words.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated from {input_path}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment}").unwrap();
    writeln!(output, "pub const {const_name}: &[&str] = &[").unwrap();

    for word in words {
        writeln!(output, "    {word:?},").unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of entries in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_COUNT: usize = {count};").unwrap();
}

/// Each line is `word|sentence`; a word may appear on several lines.
fn generate_sentence_corpus(input_path: &str, output_path: &Path, const_name: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated from {input_path}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Feudle `(word, sentence)` pairs").unwrap();
    writeln!(output, "pub const {const_name}: &[(&str, &str)] = &[").unwrap();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (word, sentence) = line
            .split_once('|')
            .unwrap_or_else(|| panic!("{input_path}:{}: expected `word|sentence`", number + 1));
        writeln!(output, "    ({:?}, {:?}),", word.trim(), sentence.trim()).unwrap();
    }

    writeln!(output, "];").unwrap();
}
