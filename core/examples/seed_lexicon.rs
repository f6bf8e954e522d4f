//! Populates a lexicon database with sample entries and prints a few views.
//!
//! Run with: `cargo run -q --example seed_lexicon -p lexicon_core`

use lexicon_core::LexEntryRepository;
use lexicon_core::dictionary::fields::{FORM, HOMOGRAPH_NUMBER};
use lexicon_core::model::{LexSense, SEMANTIC_DOMAIN_DDP4};
use lexicon_core::types::{Config, RepositoryConfig, WritingSystem, WritingSystemId};
use lexicon_core::{MatchOptions, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let paths = Config {
        base_path: std::env::temp_dir().join("lexicon-seed"),
    };
    println!("Using data path: {}", paths.base_path.display());

    let config = RepositoryConfig::load(&paths.config_path()).unwrap_or_default();
    let mut lexicon = LexEntryRepository::open_redb(&paths, &config)?;
    lexicon.delete_all_items()?;

    let vernacular = WritingSystem::parse("qaa")?;
    let english = WritingSystem::parse("en")?;

    println!("\n[Entries]");
    seed_entries(&mut lexicon, vernacular.id(), english.id())?;

    println!("\n[Headwords]");
    for token in &lexicon.get_all_entries_sorted_by_headword(&vernacular)? {
        println!(
            "  {:<10} homograph {}",
            token.get_str(FORM).unwrap_or("-"),
            token
                .get(HOMOGRAPH_NUMBER)
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
        );
    }

    println!("\n[Definitions]");
    for token in &lexicon.get_all_entries_sorted_by_definition_or_gloss(&english)? {
        println!("  {}", token.get_str(FORM).unwrap_or("-"));
    }

    println!("\n[Similar to \"tak\"]");
    let similar = lexicon.get_entries_with_similar_lexical_form(
        "tak",
        &vernacular,
        MatchOptions::IncludePrefixedAndNextClosestForms,
    )?;
    for token in &similar {
        println!("  {}", token.get_str(FORM).unwrap_or("-"));
    }

    println!("\nDatabase now has {} entries", lexicon.count_all_items());
    Ok(())
}

fn seed_entries(
    lexicon: &mut LexEntryRepository,
    vernacular: &WritingSystemId,
    english: &WritingSystemId,
) -> Result<()> {
    let entries = [
        ("taka", "house; dwelling", "house", "6.5.1 Building"),
        ("taka", "to build", "build", "6.5.1 Building"),
        ("takam", "roof", "roof", "6.5.1 Building"),
        ("tiko", "water", "water", "1.3 Water"),
        ("duma", "river; stream", "river", "1.3 Water"),
    ];

    let mut ids = Vec::new();
    for (form, definition, gloss, domain) in entries {
        let id = lexicon.create_item()?;
        let entry = lexicon.get_item_mut(id)?;
        entry.lexical_form.set(vernacular, form);

        let mut sense = LexSense::default();
        sense.definition.set(english, definition);
        sense.gloss.set(english, gloss);
        sense.add_option(SEMANTIC_DOMAIN_DDP4, domain);
        entry.senses.push(sense);

        println!("  + {form}");
        ids.push(id);
    }

    lexicon.save_items(&ids)
}
