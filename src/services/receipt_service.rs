// src/services/receipt_service.rs

use std::path::PathBuf;

use genpdf::{elements, style, Element};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{contract::Contract, installment::PaymentInstallment},
    state::DashboardState,
};

/// Dados do estúdio impressos no recibo.
#[derive(Debug, Clone)]
pub struct ReceiptSettings {
    pub fonts_dir: PathBuf,
    pub studio_name: String,
    pub studio_document: Option<String>,
}

#[derive(Clone)]
pub struct ReceiptService {
    state: DashboardState,
    settings: ReceiptSettings,
}

/// Linhas "rótulo: valor" do corpo do recibo.
pub fn receipt_lines(installment: &PaymentInstallment, contract: &Contract) -> Vec<(String, String)> {
    let mut lines = vec![
        ("Cliente".to_string(), installment.client_name.clone()),
        ("Projeto".to_string(), installment.project_name.clone()),
        ("Parcela".to_string(), installment.installment.clone()),
        ("Vencimento".to_string(), installment.due_date.format("%d/%m/%Y").to_string()),
        ("Valor".to_string(), format!("R$ {:.2}", installment.value)),
        ("Situação".to_string(), installment.status.as_str().to_string()),
    ];

    if let Some(paid_on) = installment.payment_date {
        lines.push(("Pago em".to_string(), paid_on.format("%d/%m/%Y").to_string()));
    }
    if !contract.terms.services.is_empty() {
        lines.push((
            "Serviços contratados".to_string(),
            format!("R$ {:.2}", contract.terms.services_total()),
        ));
    }
    if let Some(address) = &contract.terms.project_address {
        lines.push(("Endereço da obra".to_string(), address.clone()));
    }
    lines
}

impl ReceiptService {
    pub fn new(state: DashboardState, settings: ReceiptSettings) -> Self {
        Self { state, settings }
    }

    /// Recibo em PDF de uma parcela paga.
    pub async fn generate_receipt_pdf(&self, installment_id: Uuid) -> Result<Vec<u8>, AppError> {
        let data = self.state.snapshot().await;
        let installment = data
            .installments
            .get(&installment_id)
            .ok_or(AppError::InstallmentNotFound(installment_id))?;

        if !installment.status.is_paid() {
            return Err(AppError::InvalidState(
                "Só é possível emitir recibo de parcela paga".to_string(),
            ));
        }
        let contract = data.contract(installment.contract_id)?;
        let lines = receipt_lines(installment, contract);

        let font_family = genpdf::fonts::from_files(&self.settings.fonts_dir, "Roboto", None)
            .map_err(|_| {
                AppError::FontNotFound(format!(
                    "Fonte Roboto não encontrada em {}",
                    self.settings.fonts_dir.display()
                ))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Recibo {} - {}", installment.installment, installment.project_name));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new(self.settings.studio_name.clone())
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        if let Some(document) = &self.settings.studio_document {
            doc.push(
                elements::Paragraph::new(format!("CNPJ/CPF: {}", document))
                    .styled(style::Style::new().with_font_size(10)),
            );
        }

        doc.push(elements::Break::new(1.5));
        doc.push(
            elements::Paragraph::new("RECIBO DE PAGAMENTO")
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Break::new(1));

        let mut table = elements::TableLayout::new(vec![1, 3]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        let bold = style::Style::new().bold();
        for (label, value) in lines {
            table
                .row()
                .element(elements::Paragraph::new(label).styled(bold))
                .element(elements::Paragraph::new(value))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }
        doc.push(table);

        doc.push(elements::Break::new(2));
        let mut statement = elements::Paragraph::new(format!(
            "Recebemos de {} a quantia de R$ {:.2} referente à parcela {} do projeto {}.",
            installment.client_name, installment.value, installment.installment, installment.project_name
        ));
        statement.set_alignment(genpdf::Alignment::Left);
        doc.push(statement);

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        tracing::info!(installment_id = %installment_id, bytes = buffer.len(), "Recibo gerado");
        Ok(buffer)
    }
}
