use std::io::Read;

use crate::catalog::CreateIngredientInput;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub skipped: usize,
}

impl super::Command {
    /// Loads headerless `name,measurement_unit` rows. Rows already present are
    /// skipped and counted.
    pub async fn import_ingredients(
        &self,
        reader: impl Read,
    ) -> foodgram_shared::Result<ImportReport> {
        let inputs = parse(reader)?;

        let mut report = ImportReport::default();

        for input in inputs {
            match self.create_ingredient(input).await {
                Ok(_) => report.created += 1,
                Err(foodgram_shared::Error::Conflict(_)) => report.skipped += 1,
                Err(err) => return Err(err),
            }
        }

        tracing::info!(
            created = report.created,
            skipped = report.skipped,
            "ingredients imported"
        );

        Ok(report)
    }
}

fn parse(reader: impl Read) -> foodgram_shared::Result<Vec<CreateIngredientInput>> {
    let mut inputs = vec![];
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(anyhow::Error::from)?;

        let (Some(name), Some(measurement_unit)) = (record.get(0), record.get(1)) else {
            foodgram_shared::bail!("line {}: expected name,measurement_unit", line + 1);
        };

        inputs.push(CreateIngredientInput {
            name: name.trim().to_owned(),
            measurement_unit: measurement_unit.trim().to_owned(),
        });
    }

    Ok(inputs)
}
