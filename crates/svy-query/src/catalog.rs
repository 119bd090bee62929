use svy_model::{AnswerOption, Question, Table, VariableMetadata};
use svy_taxonomy::Taxonomy;

/// Derives the question catalog from a dataset: one question per column
/// that carries question text, in column order. Options mirror the value
/// labels in their defined order; the category comes from the taxonomy
/// and stays `None` for unclassified identifiers.
pub(crate) fn build_questions(
    table: &Table,
    metadata: &VariableMetadata,
    taxonomy: &Taxonomy,
) -> Vec<Question> {
    let mut questions = Vec::new();
    for column in table.columns() {
        let Some(text) = metadata.label(column.name()) else {
            continue;
        };
        let options = metadata
            .value_labels(column.name())
            .map(|labels| {
                labels
                    .entries()
                    .iter()
                    .map(|(value, label)| AnswerOption {
                        value: value.clone(),
                        label: label.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        questions.push(Question {
            identifier: column.name().to_string(),
            text: text.to_string(),
            category: taxonomy.category_for(column.name()).cloned(),
            options,
        });
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use svy_model::{CellValue, Column};

    fn num(v: f64) -> CellValue {
        CellValue::Numeric(v)
    }

    #[test]
    fn only_labeled_columns_become_questions() {
        let mut table = Table::new();
        table.push_column(Column::new("Q_1", vec![num(1.0)])).unwrap();
        table.push_column(Column::new("FOLIO", vec![num(77.0)])).unwrap();
        table.push_column(Column::new("SEXO", vec![num(2.0)])).unwrap();

        let mut metadata = VariableMetadata::new();
        metadata.set_label("Q_1", "How satisfied are you with your life?");
        metadata.set_label("SEXO", "Sexo");
        metadata.insert_value_label("SEXO", num(1.0), "Hombre");
        metadata.insert_value_label("SEXO", num(2.0), "Mujer");

        let questions = build_questions(&table, &metadata, &Taxonomy::survey_2024());

        let identifiers: Vec<&str> = questions.iter().map(|q| q.identifier.as_str()).collect();
        assert_eq!(identifiers, ["Q_1", "SEXO"]);

        assert_eq!(questions[0].category.as_ref().map(|c| c.id), Some(1));
        assert!(questions[0].options.is_empty());

        assert_eq!(questions[1].category.as_ref().map(|c| c.id), Some(17));
        let option_labels: Vec<&str> = questions[1]
            .options
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(option_labels, ["Hombre", "Mujer"]);
    }

    #[test]
    fn unclassified_identifiers_have_no_category() {
        let mut table = Table::new();
        table
            .push_column(Column::new("X_CUSTOM", vec![num(1.0)]))
            .unwrap();
        let mut metadata = VariableMetadata::new();
        metadata.set_label("X_CUSTOM", "A bolted-on question");

        let questions = build_questions(&table, &metadata, &Taxonomy::survey_2024());
        assert_eq!(questions.len(), 1);
        assert!(questions[0].category.is_none());
    }
}
