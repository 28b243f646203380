// src/services/scheduling.rs

//! Montagem e recálculo de cronogramas.
//!
//! As etapas formam uma cadeia simples: cada etapa começa no dia útil
//! seguinte ao fim efetivo da anterior (conclusão, se registrada; senão o
//! prazo). Não há etapas em paralelo.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    models::{
        contract::Contract,
        schedule::{ProjectSchedule, ProjectStage, ProjectStageTemplateItem},
    },
    services::calendar::{add_business_days, next_business_day, roll_to_business_day},
};

// Uma etapa de 1 dia começa e termina no mesmo dia.
fn deadline_for(start: NaiveDate, duration_work_days: u32) -> NaiveDate {
    add_business_days(start, duration_work_days.saturating_sub(1))
}

/// Recalcula início e prazo de cada etapa a partir do início do projeto,
/// preservando id, nome, duração e datas de conclusão já registradas.
///
/// É idempotente: aplicar duas vezes com a mesma data dá o mesmo resultado.
pub fn recalculate_schedule_stages(
    stages: &[ProjectStage],
    project_start: NaiveDate,
) -> Vec<ProjectStage> {
    let mut calculated: Vec<ProjectStage> = Vec::with_capacity(stages.len());

    for stage in stages {
        let start_date = match calculated.last() {
            Some(prev) => next_business_day(prev.effective_end()),
            None => roll_to_business_day(project_start),
        };

        calculated.push(ProjectStage {
            start_date,
            deadline: deadline_for(start_date, stage.duration_work_days),
            ..stage.clone()
        });
    }

    calculated
}

/// Monta as etapas de um cronograma novo a partir do modelo.
pub fn build_schedule_stages(
    template: &[ProjectStageTemplateItem],
    project_start: NaiveDate,
) -> Vec<ProjectStage> {
    let seeds: Vec<ProjectStage> = template
        .iter()
        .map(|item| ProjectStage {
            id: item.id,
            name: item.name.clone(),
            duration_work_days: item.duration_work_days,
            start_date: project_start,
            deadline: project_start,
            completion_date: None,
        })
        .collect();

    recalculate_schedule_stages(&seeds, project_start)
}

/// Cronograma novo para um contrato, ancorado na data do contrato.
pub fn build_schedule(contract: &Contract, template: &[ProjectStageTemplateItem]) -> ProjectSchedule {
    ProjectSchedule {
        id: Uuid::new_v4(),
        contract_id: contract.id,
        client_name: contract.client_name.clone(),
        project_name: contract.project_name.clone(),
        start_date: contract.terms.date,
        stages: build_schedule_stages(template, contract.terms.date),
    }
}

/// Reancora um cronograma existente em um contrato editado. Se o contrato
/// ainda não tem cronograma, monta um a partir do modelo.
pub fn rebase_schedule(
    existing: Option<&ProjectSchedule>,
    contract: &Contract,
    template: &[ProjectStageTemplateItem],
) -> ProjectSchedule {
    match existing {
        Some(schedule) => ProjectSchedule {
            id: schedule.id,
            contract_id: contract.id,
            client_name: contract.client_name.clone(),
            project_name: contract.project_name.clone(),
            start_date: contract.terms.date,
            stages: recalculate_schedule_stages(&schedule.stages, contract.terms.date),
        },
        None => build_schedule(contract, template),
    }
}

/// Modelo padrão de etapas do estúdio.
pub fn default_stage_template() -> Vec<ProjectStageTemplateItem> {
    [
        ("Reunião de Briefing", 1),
        ("Medição", 2),
        ("Apresentação do Layout Planta Baixa", 10),
        ("Revisão 01 (Planta Baixa)", 5),
        ("Revisão 02 (Planta Baixa)", 5),
        ("Revisão 03 (Planta Baixa)", 5),
        ("Apresentação de 3D", 15),
        ("Revisão 01 (3D)", 5),
        ("Revisão 02 (3D)", 5),
        ("Revisão 03 (3D)", 5),
        ("Executivo", 20),
        ("Entrega", 1),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, duration_work_days), id)| ProjectStageTemplateItem {
        id,
        name: name.to_string(),
        duration_work_days,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::calendar::is_business_day;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn item(id: i32, name: &str, days: u32) -> ProjectStageTemplateItem {
        ProjectStageTemplateItem { id, name: name.to_string(), duration_work_days: days }
    }

    #[test]
    fn single_five_day_stage_ends_on_friday() {
        let stages = build_schedule_stages(&[item(1, "Briefing", 5)], d(2024, 1, 1));
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].start_date, d(2024, 1, 1));
        assert_eq!(stages[0].deadline, d(2024, 1, 5));
    }

    #[test]
    fn one_day_stage_starts_and_ends_same_day() {
        let stages = build_schedule_stages(&[item(1, "Entrega", 1)], d(2024, 1, 3));
        assert_eq!(stages[0].start_date, stages[0].deadline);
    }

    #[test]
    fn zero_duration_is_treated_like_one_day() {
        let stages = build_schedule_stages(&[item(1, "A", 0), item(2, "B", 1)], d(2024, 1, 3));
        assert_eq!(stages[0].deadline, d(2024, 1, 3));
        assert_eq!(stages[1].start_date, d(2024, 1, 4));
    }

    #[test]
    fn weekend_project_start_moves_to_monday() {
        let stages = build_schedule_stages(&[item(1, "A", 2)], d(2024, 1, 6));
        assert_eq!(stages[0].start_date, d(2024, 1, 8));
        assert_eq!(stages[0].deadline, d(2024, 1, 9));
    }

    #[test]
    fn stages_chain_without_overlap_or_weekends() {
        let stages = build_schedule_stages(&default_stage_template(), d(2024, 3, 16));
        for pair in stages.windows(2) {
            assert!(pair[1].start_date > pair[0].effective_end());
            assert_eq!(pair[1].start_date, next_business_day(pair[0].effective_end()));
        }
        for stage in &stages {
            assert!(is_business_day(stage.start_date));
            assert!(is_business_day(stage.deadline));
            assert!(stage.deadline >= stage.start_date);
        }
    }

    #[test]
    fn completion_date_drives_the_next_start() {
        let mut stages = build_schedule_stages(
            &[item(1, "A", 5), item(2, "B", 3)],
            d(2024, 1, 1),
        );
        // Terminou antes do prazo, numa quarta
        stages[0].completion_date = Some(d(2024, 1, 3));
        let recalculated = recalculate_schedule_stages(&stages, d(2024, 1, 1));
        assert_eq!(recalculated[1].start_date, d(2024, 1, 4));
        assert_eq!(recalculated[1].deadline, d(2024, 1, 8));
        assert_eq!(recalculated[0].completion_date, Some(d(2024, 1, 3)));
    }

    #[test]
    fn completion_on_saturday_starts_next_on_monday() {
        let mut stages = build_schedule_stages(&[item(1, "A", 5), item(2, "B", 1)], d(2024, 1, 1));
        stages[0].completion_date = Some(d(2024, 1, 6));
        let recalculated = recalculate_schedule_stages(&stages, d(2024, 1, 1));
        assert_eq!(recalculated[1].start_date, d(2024, 1, 8));
    }

    #[test]
    fn recalculation_is_idempotent() {
        let mut stages = build_schedule_stages(&default_stage_template(), d(2024, 5, 2));
        stages[2].completion_date = Some(d(2024, 5, 25));
        let once = recalculate_schedule_stages(&stages, d(2024, 6, 1));
        let twice = recalculate_schedule_stages(&once, d(2024, 6, 1));
        assert_eq!(once, twice);
    }

    #[test]
    fn recalculation_preserves_identity_fields() {
        let stages = build_schedule_stages(&default_stage_template(), d(2024, 5, 2));
        let moved = recalculate_schedule_stages(&stages, d(2024, 7, 1));
        for (before, after) in stages.iter().zip(&moved) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.name, after.name);
            assert_eq!(before.duration_work_days, after.duration_work_days);
        }
        assert_eq!(moved[0].start_date, d(2024, 7, 1));
    }

    #[test]
    fn empty_template_gives_empty_schedule() {
        assert!(build_schedule_stages(&[], d(2024, 1, 1)).is_empty());
    }
}
