// src/services/calendar.rs

//! Aritmética de dias úteis (segunda a sexta) sobre datas puras.
//!
//! Não existe fuso nem hora aqui: `NaiveDate` é só uma data de calendário,
//! então nenhuma correção de timezone é necessária.

use chrono::{Datelike, Months, NaiveDate, Weekday};

/// Data de hoje no relógio local do servidor.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A própria data, se for dia útil; senão a segunda-feira seguinte.
pub fn roll_to_business_day(date: NaiveDate) -> NaiveDate {
    let mut current = date;
    while !is_business_day(current) {
        current = current.succ_opt().unwrap_or(current);
    }
    current
}

/// Primeiro dia útil estritamente depois de `date`.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    add_business_days(date, 1)
}

/// Avança um dia de calendário por vez, contando só dias úteis, até somar
/// `days`. Com `days == 0` devolve `start` sem alteração.
pub fn add_business_days(start: NaiveDate, days: u32) -> NaiveDate {
    let mut current = start;
    let mut added = 0;
    while added < days {
        current = match current.succ_opt() {
            Some(next) => next,
            None => return current,
        };
        if is_business_day(current) {
            added += 1;
        }
    }
    current
}

/// Passo de meses de calendário (parcelas). Dia inexistente no mês de
/// destino vira o último dia desse mês: 31/01 + 1 mês = 29/02 em ano bissexto.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}
