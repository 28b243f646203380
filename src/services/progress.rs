// src/services/progress.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    progress::{ProjectProgress, StageProgress, StageStatus},
    schedule::ProjectSchedule,
};

/// Fases do Gantt resumido, na ordem de exibição, e as etapas detalhadas
/// que cada uma agrupa.
pub const PROGRESS_BUCKETS: [(&str, &[&str]); 5] = [
    ("Briefing", &["Reunião de Briefing", "Medição"]),
    (
        "Layout",
        &[
            "Apresentação do Layout Planta Baixa",
            "Revisão 01 (Planta Baixa)",
            "Revisão 02 (Planta Baixa)",
            "Revisão 03 (Planta Baixa)",
        ],
    ),
    (
        "3D",
        &[
            "Apresentação de 3D",
            "Revisão 01 (3D)",
            "Revisão 02 (3D)",
            "Revisão 03 (3D)",
        ],
    ),
    ("Executivo", &["Executivo"]),
    ("Entrega", &["Entrega"]),
];

/// Consolida o cronograma detalhado nas cinco fases.
///
/// - `completed`: todas as etapas da fase têm data de conclusão;
/// - `in_progress`: algumas têm, ou nenhuma tem mas a primeira etapa da fase
///   já começou (início <= hoje);
/// - `pending`: caso contrário, e sempre que a fase não tem etapas.
pub fn generate_project_progress(schedule: &ProjectSchedule, today: NaiveDate) -> ProjectProgress {
    let stages = PROGRESS_BUCKETS
        .iter()
        .map(|(bucket, detailed_names)| {
            let relevant: Vec<_> = schedule
                .stages
                .iter()
                .filter(|s| detailed_names.contains(&s.name.as_str()))
                .collect();

            let completed = relevant.iter().filter(|s| s.completion_date.is_some()).count();

            let status = match relevant.first() {
                None => StageStatus::Pending,
                Some(_) if completed == relevant.len() => StageStatus::Completed,
                Some(_) if completed > 0 => StageStatus::InProgress,
                Some(first) if first.start_date <= today => StageStatus::InProgress,
                Some(_) => StageStatus::Pending,
            };

            StageProgress { name: bucket.to_string(), status }
        })
        .collect();

    ProjectProgress {
        contract_id: schedule.contract_id,
        project_name: schedule.project_name.clone(),
        client_name: schedule.client_name.clone(),
        stages,
    }
}

/// Consolidação padrão (tudo pendente), usada quando não há cronograma.
pub fn default_project_progress(contract_id: Uuid, project_name: &str, client_name: &str) -> ProjectProgress {
    ProjectProgress {
        contract_id,
        project_name: project_name.to_string(),
        client_name: client_name.to_string(),
        stages: PROGRESS_BUCKETS
            .iter()
            .map(|(bucket, _)| StageProgress {
                name: bucket.to_string(),
                status: StageStatus::Pending,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scheduling::{build_schedule_stages, default_stage_template};
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn schedule_starting(start: NaiveDate) -> ProjectSchedule {
        ProjectSchedule {
            id: Uuid::new_v4(),
            contract_id: Uuid::new_v4(),
            client_name: "Maria".into(),
            project_name: "Apto".into(),
            start_date: start,
            stages: build_schedule_stages(&default_stage_template(), start),
        }
    }

    fn status_of(progress: &ProjectProgress, bucket: &str) -> StageStatus {
        progress.stages.iter().find(|s| s.name == bucket).unwrap().status
    }

    #[test]
    fn buckets_come_in_fixed_order() {
        let progress = generate_project_progress(&schedule_starting(d(2024, 1, 1)), d(2023, 6, 1));
        let names: Vec<_> = progress.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Briefing", "Layout", "3D", "Executivo", "Entrega"]);
    }

    #[test]
    fn future_schedule_is_all_pending() {
        let progress = generate_project_progress(&schedule_starting(d(2024, 1, 1)), d(2023, 12, 31));
        assert!(progress.stages.iter().all(|s| s.status == StageStatus::Pending));
    }

    #[test]
    fn layout_fully_completed_is_completed() {
        let mut schedule = schedule_starting(d(2024, 1, 1));
        for stage in schedule.stages.iter_mut().filter(|s| s.name.contains("Planta Baixa")) {
            stage.completion_date = Some(stage.deadline);
        }
        let progress = generate_project_progress(&schedule, d(2023, 12, 1));
        assert_eq!(status_of(&progress, "Layout"), StageStatus::Completed);
    }

    #[test]
    fn layout_partially_completed_is_in_progress() {
        let mut schedule = schedule_starting(d(2024, 1, 1));
        let first_layout = schedule
            .stages
            .iter_mut()
            .find(|s| s.name == "Apresentação do Layout Planta Baixa")
            .unwrap();
        first_layout.completion_date = Some(first_layout.deadline);
        let progress = generate_project_progress(&schedule, d(2023, 12, 1));
        assert_eq!(status_of(&progress, "Layout"), StageStatus::InProgress);
    }

    #[test]
    fn started_bucket_without_completions_is_in_progress() {
        let schedule = schedule_starting(d(2024, 1, 1));
        let progress = generate_project_progress(&schedule, d(2024, 1, 1));
        assert_eq!(status_of(&progress, "Briefing"), StageStatus::InProgress);
        assert_eq!(status_of(&progress, "Layout"), StageStatus::Pending);
    }

    #[test]
    fn bucket_without_mapped_stages_is_pending() {
        let mut schedule = schedule_starting(d(2024, 1, 1));
        schedule.stages.retain(|s| s.name != "Executivo");
        let progress = generate_project_progress(&schedule, d(2030, 1, 1));
        assert_eq!(status_of(&progress, "Executivo"), StageStatus::Pending);
    }

    #[test]
    fn rollup_depends_only_on_stage_data() {
        let a = schedule_starting(d(2024, 1, 1));
        let mut b = a.clone();
        b.id = Uuid::new_v4();
        let today = d(2024, 2, 10);
        assert_eq!(
            generate_project_progress(&a, today).stages,
            generate_project_progress(&b, today).stages
        );
    }

    #[test]
    fn default_rollup_is_all_pending() {
        let progress = default_project_progress(Uuid::new_v4(), "Apto", "Maria");
        assert_eq!(progress.stages.len(), 5);
        assert!(progress.stages.iter().all(|s| s.status == StageStatus::Pending));
    }
}
