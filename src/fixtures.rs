//! Catálogo de exemplo compartilhado pelos testes.

use crate::core::{
    ClinicalRelevance, ContentStatus, CrossReference, Entry, KeyTerm, LevelContent, Locale,
    LocalizedText, ReferenceCard, Relationship,
};

pub fn es() -> Locale {
    Locale::new("es")
}

fn bilingual(en: &str, es_text: &str) -> LocalizedText {
    LocalizedText::new(en).with(es(), es_text)
}

fn hypothyroidism() -> Entry {
    let mut entry = Entry::new(
        "hypothyroidism",
        "thyroid",
        bilingual("Hypothyroidism", "Hipotiroidismo"),
    )
    .with_ladder([
        LevelContent::new(
            bilingual("Your body runs slow", "Tu cuerpo va lento"),
            bilingual(
                "A small gland in your neck makes too little of its helper juice.",
                "Una glándula pequeña en tu cuello produce muy poco de su jugo ayudante.",
            ),
        ),
        LevelContent::new(
            "Underactive thyroid",
            "The thyroid does not make enough hormone, so metabolism slows and you feel tired and cold.",
        )
        .with_clinical_feature("Fatigue and cold intolerance"),
        LevelContent::new(
            "Low thyroid hormone state",
            "Monitor for bradycardia, constipation and weight gain; levothyroxine is taken on an empty stomach.",
        )
        .with_management("Levothyroxine once daily before breakfast"),
        LevelContent::new(
            "Primary vs central hypothyroidism",
            "Hashimoto thyroiditis is the most common cause in iodine-sufficient regions; TSH is high in primary disease.",
        )
        .with_key_term(KeyTerm::new("TSH", "Thyroid-stimulating hormone from the pituitary")),
        LevelContent::new(
            "Subclinical disease and myxedema",
            "Treat subclinical disease when TSH exceeds 10 mIU/L; myxedema coma requires IV T4 with stress-dose steroids.",
        ),
    ])
    .with_key_pearl("Check TSH 6 to 8 weeks after a dose change")
    .with_cross_reference(
        CrossReference::new("hyperthyroidism-graves", Relationship::Sibling).labeled("Opposite state"),
    )
    .with_tag("endocrine");
    entry.tags.clinical_relevance = Some(ClinicalRelevance::High);
    entry
}

/// Onze entradas: genética, cinco de tireoide, próstata e renal.
pub fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new(
            "cystic-fibrosis",
            "mendelian",
            bilingual("Cystic fibrosis", "Fibrosis quística"),
        )
        .with_alternate_name("Mucoviscidosis")
        .with_key_pearl("Carrier frequency ~1/25 in Caucasians")
        .with_keyword("CFTR"),
        hypothyroidism(),
        Entry::new(
            "hyperthyroidism-graves",
            "thyroid",
            bilingual("Graves disease", "Enfermedad de Graves"),
        )
        .with_key_pearl("TSH receptor antibodies confirm the diagnosis")
        .with_cross_reference(CrossReference::new("thyroid-storm", Relationship::Child))
        .with_cross_reference(CrossReference::new("hypothyroidism", Relationship::Sibling))
        .with_tag("endocrine"),
        Entry::new("thyroid-storm", "thyroid", bilingual("Thyroid storm", "Tormenta tiroidea"))
            .with_key_pearl("Give propylthiouracil before iodine")
            .with_cross_reference(
                CrossReference::new("hyperthyroidism-graves", Relationship::Parent)
                    .labeled("Decompensated thyrotoxicosis"),
            ),
        Entry::new("thyroid-nodule", "thyroid", bilingual("Thyroid nodule", "Nódulo tiroideo"))
            .with_subcategory("nodule")
            .with_cross_reference(CrossReference::new("thyroid-cancer", Relationship::SeeAlso)),
        Entry::new("thyroid-cancer", "thyroid", bilingual("Thyroid cancer", "Cáncer de tiroides"))
            .with_subcategory("oncology")
            .with_keyword("papillary carcinoma")
            .with_status(ContentStatus::Review),
        Entry::new(
            "bph",
            "prostate",
            bilingual("Benign prostatic hyperplasia", "Hiperplasia prostática benigna"),
        )
        .with_alternate_name("BPH")
        .with_key_pearl("Alpha blockers relieve symptoms within days")
        .with_tag("urology"),
        Entry::new("ckd", "renal", bilingual("Chronic kidney disease", "Enfermedad renal crónica"))
            .with_cross_reference(CrossReference::new("dialysis", Relationship::Related)),
        Entry::new("dialysis", "renal", bilingual("Dialysis", "Diálisis"))
            .with_cross_reference(
                CrossReference::new("ckd", Relationship::Related).labeled("CKD as indication for dialysis"),
            )
            .with_status(ContentStatus::Draft),
        Entry::new("aki", "renal", bilingual("Acute kidney injury", "Lesión renal aguda"))
            .with_cross_reference(CrossReference::new("ckd", Relationship::SeeAlso)),
        Entry::new("nephrotic-syndrome", "renal", bilingual("Nephrotic syndrome", "Síndrome nefrótico"))
            .with_keyword("proteinuria"),
    ]
}

pub fn sample_cards() -> Vec<ReferenceCard> {
    vec![
        ReferenceCard::new(
            "septic-shock",
            "shock",
            bilingual("Septic shock", "Choque séptico"),
            "Sepsis with vasopressor need to keep MAP at or above 65 mmHg and lactate above 2 mmol/L.",
        )
        .with_clinical_feature("Hypotension despite fluids")
        .with_key_pearl("Start norepinephrine early")
        .with_cross_reference(CrossReference::new("ards", Relationship::Related)),
        ReferenceCard::new(
            "ards",
            "respiratory",
            bilingual("Acute respiratory distress syndrome", "Síndrome de dificultad respiratoria aguda"),
            "Bilateral infiltrates with hypoxemia not explained by heart failure.",
        )
        .with_key_pearl("Low tidal volume ventilation at 6 mL/kg")
        .with_cross_reference(CrossReference::new("septic-shock", Relationship::Related)),
    ]
}
