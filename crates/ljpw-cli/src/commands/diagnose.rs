//! `ljpw diagnose`

use ljpw_analysis::metrics::{Diagnostic, Entity};
use ljpw_core::{LjpwError, LjpwProfile};

use super::{format_profile, print_json};

pub fn run(
    axes: [f64; 4],
    concepts: usize,
    clarity: f64,
    name: &str,
    json: bool,
) -> Result<(), LjpwError> {
    let [l, j, p, w] = axes;
    let profile = LjpwProfile::try_new(l, j, p, w)?;
    let entity = Entity::new(name, profile)
        .with_concepts(concepts)
        .with_base_clarity(clarity);
    let diagnostic = Diagnostic::of(&entity);

    if json {
        return print_json(&diagnostic);
    }

    println!("{}  {}", diagnostic.name, format_profile(profile.as_array()));
    println!("  dominant axis   {}", diagnostic.dominant_axis.name());
    println!("  volume          {:.4}", diagnostic.volume);
    println!("  harmony         {:.4}", diagnostic.primary.harmony);
    println!("  clarity         {:.4}", diagnostic.primary.clarity);
    println!("  mass            {:.4}", diagnostic.primary.mass);
    println!("  density         {:.4}", diagnostic.primary.density);
    println!("  influence       {:.4}", diagnostic.primary.influence);
    println!(
        "  archetype       {} ({:.2})",
        diagnostic.archetype.archetype, diagnostic.archetype.confidence
    );
    println!("                  {}", diagnostic.archetype.description);
    let s = diagnostic.secondary;
    println!("  secure connectivity     {:.4}", s.secure_connectivity);
    println!("  service capacity        {:.4}", s.service_capacity);
    println!("  operational excellence  {:.4}", s.operational_excellence);
    println!("  security intelligence   {:.4}", s.security_intelligence);
    println!("  wise power              {:.4}", s.wise_power);
    println!("  loving wisdom           {:.4}", s.loving_wisdom);
    Ok(())
}
