use crate::backend::Backends;
use crate::cli::{ProfileCommand, SetProfileArgs};
use crate::output::{create_standard_table, header_cell};
use anyhow::Result;
use portfolio_model::TeacherProfile;
use portfolio_store::ProfileService;
use std::io::Write;

pub async fn run(backends: &Backends, command: &ProfileCommand, out: &mut dyn Write) -> Result<()> {
    let service = ProfileService::new(backends.records.clone());
    match command {
        ProfileCommand::Show => match service.load().await? {
            Some(profile) => write_profile(out, &profile),
            None => {
                writeln!(out, "لم يتم إنشاء الملف الشخصي بعد")?;
                Ok(())
            }
        },
        ProfileCommand::Set(args) => {
            let mut profile = service.load().await?.unwrap_or_default();
            apply(&mut profile, args);
            let saved = service.save(&profile).await?;
            write_profile(out, &saved)
        }
    }
}

fn apply(profile: &mut TeacherProfile, args: &SetProfileArgs) {
    let text_fields = [
        (&mut profile.full_name, &args.full_name),
        (&mut profile.specialization, &args.specialization),
        (&mut profile.school, &args.school),
        (&mut profile.stage, &args.stage),
        (&mut profile.philosophy_vision, &args.philosophy),
        (&mut profile.planning_intro, &args.planning_intro),
        (&mut profile.strategies_remedial, &args.strategies_remedial),
    ];
    for (target, value) in text_fields {
        if let Some(value) = value {
            *target = value.clone();
        }
    }
    if let Some(years) = args.experience_years {
        profile.experience_years = years;
    }
    if !args.qualifications.is_empty() {
        profile.qualifications_list = args.qualifications.clone();
    }
}

fn write_profile(out: &mut dyn Write, profile: &TeacherProfile) -> Result<()> {
    let schema = TeacherProfile::schema();
    let rows = [
        ("full_name", profile.full_name.clone()),
        ("specialization", profile.specialization.clone()),
        ("school", profile.school.clone()),
        ("stage", profile.stage.clone()),
        ("experience_years", profile.experience_years.to_string()),
        ("qualifications_list", profile.qualifications_list.join(", ")),
        ("philosophy_vision", profile.philosophy_vision.clone()),
        ("planning_intro", profile.planning_intro.clone()),
        ("strategies_remedial", profile.strategies_remedial.clone()),
    ];

    let mut table = create_standard_table();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    for (name, value) in rows {
        table.add_row(vec![schema.label(name), value]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}
