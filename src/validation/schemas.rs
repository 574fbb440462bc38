// Named validators for every SGHM entity and action

use crate::masks::validate_cpf;
use crate::types::{PaymentStatus, PlanType, Role};

use super::{Field, Validator};

/// Every `(entity, action)` pair understood by `validator_for`
pub const VALIDATORS: &[(&str, &[&str])] = &[
    ("medico", &["create", "update", "delete"]),
    ("paciente", &["create", "update", "delete"]),
    ("consulta", &["create", "update", "delete"]),
    ("plano", &["create", "update", "delete"]),
    ("honorario", &["create", "update-status", "update-glosa"]),
    ("auth", &["login", "create-user"]),
    ("query", &["pagination", "date-range"]),
];

#[derive(Debug, Clone)]
pub struct ValidatorOptions {
    /// Run the CPF checksum on top of the 11-digit format rule
    pub strict_cpf: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            strict_cpf: crate::config::config().validation.strict_cpf,
        }
    }
}

/// Look up a validator using options from the global config
pub fn validator_for(entity: &str, action: &str) -> Option<Validator> {
    validator_for_with(entity, action, &ValidatorOptions::default())
}

pub fn validator_for_with(entity: &str, action: &str, options: &ValidatorOptions) -> Option<Validator> {
    let fields = match (entity, action) {
        ("medico", "create") => medico_create(options),
        ("medico", "update") => medico_update(),
        ("paciente", "create") => paciente_create(options),
        ("paciente", "update") => paciente_update(options),
        ("consulta", "create") => consulta_create(),
        ("consulta", "update") => consulta_update(),
        ("plano", "create") => plano_create(),
        ("plano", "update") => plano_update(),
        ("medico" | "paciente" | "consulta" | "plano", "delete") => vec![id_param()],
        ("honorario", "create") => honorario_create(),
        ("honorario", "update-status") => honorario_update_status(),
        ("honorario", "update-glosa") => honorario_update_glosa(),
        ("auth", "login") => auth_login(),
        ("auth", "create-user") => auth_create_user(),
        ("query", "pagination") => query_pagination(),
        ("query", "date-range") => query_date_range(),
        _ => {
            tracing::debug!(entity, action, "no validator registered");
            return None;
        }
    };

    Some(Validator::new(format!("{entity}.{action}"), fields))
}

fn id_param() -> Field {
    Field::param("id").int_min(1, "ID inválido")
}

fn email_field() -> Field {
    Field::body("email").trim().email("Email inválido").normalize_email()
}

// CNPJ values are only format-checked
fn checksum_cpf_or_cnpj(value: &str) -> bool {
    value.len() != 11 || validate_cpf(value)
}

fn medico_create(options: &ValidatorOptions) -> Vec<Field> {
    let mut cnpj_cpf = Field::body("cnpj_cpf")
        .optional()
        .trim()
        .digits_exact(&[11, 14], "CPF/CNPJ deve ter 11 ou 14 dígitos");
    if options.strict_cpf {
        cnpj_cpf = cnpj_cpf.custom(checksum_cpf_or_cnpj, "CPF inválido");
    }

    vec![
        Field::body("nome_medico")
            .trim()
            .not_empty("Nome do médico é obrigatório")
            .length(3, 255, "Nome deve ter entre 3 e 255 caracteres"),
        Field::body("crm")
            .trim()
            .not_empty("CRM é obrigatório")
            .digits(4, 10, "CRM deve conter apenas números (4-10 dígitos)"),
        Field::body("especialidade")
            .optional()
            .trim()
            .max_length(100, "Especialidade deve ter no máximo 100 caracteres"),
        Field::body("telefone")
            .optional()
            .trim()
            .phone_chars("Telefone em formato inválido"),
        email_field().optional(),
        cnpj_cpf,
        Field::body("percentual_repasse")
            .optional()
            .float_range(0.0, 100.0, "Percentual deve estar entre 0 e 100"),
    ]
}

fn medico_update() -> Vec<Field> {
    vec![
        id_param(),
        Field::body("nome_medico")
            .optional()
            .trim()
            .length(3, 255, "Nome deve ter entre 3 e 255 caracteres"),
        Field::body("crm")
            .optional()
            .trim()
            .digits(4, 10, "CRM deve conter apenas números (4-10 dígitos)"),
        email_field().optional(),
        Field::body("percentual_repasse")
            .optional()
            .float_range(0.0, 100.0, "Percentual deve estar entre 0 e 100"),
    ]
}

fn patient_cpf(options: &ValidatorOptions, required: bool) -> Field {
    let mut cpf = Field::body("cpf").trim();
    cpf = if required {
        cpf.not_empty("CPF é obrigatório")
    } else {
        cpf.optional()
    };
    cpf = cpf.digits(11, 11, "CPF deve ter 11 dígitos");
    if options.strict_cpf {
        cpf = cpf.custom(validate_cpf, "CPF inválido");
    }
    cpf
}

fn paciente_create(options: &ValidatorOptions) -> Vec<Field> {
    vec![
        Field::body("nome_paciente")
            .trim()
            .not_empty("Nome do paciente é obrigatório")
            .length(3, 255, "Nome deve ter entre 3 e 255 caracteres"),
        Field::body("data_nascimento")
            .optional_falsy()
            .iso8601("Data de nascimento inválida"),
        patient_cpf(options, true),
        Field::body("telefone")
            .optional()
            .trim()
            .phone_chars("Telefone em formato inválido"),
        email_field().optional(),
        Field::body("convenio_id")
            .optional()
            .int_min(1, "ID do convênio inválido"),
    ]
}

fn paciente_update(options: &ValidatorOptions) -> Vec<Field> {
    vec![
        id_param(),
        Field::body("nome_paciente")
            .optional()
            .trim()
            .length(3, 255, "Nome deve ter entre 3 e 255 caracteres"),
        patient_cpf(options, false),
        email_field().optional(),
    ]
}

fn consulta_create() -> Vec<Field> {
    vec![
        Field::body("medico_id").int_min(1, "ID do médico é obrigatório e deve ser válido"),
        Field::body("paciente_id").int_min(1, "ID do paciente é obrigatório e deve ser válido"),
        Field::body("data_consulta")
            .not_empty("Data da consulta é obrigatória")
            .iso8601("Data da consulta inválida"),
        Field::body("valor_bruto").float_min(0.0, "Valor da consulta deve ser um número positivo"),
        Field::body("plano_saude_id")
            .optional()
            .int_min(1, "ID do plano de saúde inválido"),
    ]
}

fn consulta_update() -> Vec<Field> {
    vec![
        id_param(),
        Field::body("data_consulta")
            .optional()
            .iso8601("Data da consulta inválida"),
        Field::body("valor_bruto")
            .optional()
            .float_min(0.0, "Valor da consulta deve ser um número positivo"),
    ]
}

fn plan_type() -> Field {
    Field::body("tipo_plano")
        .optional()
        .one_of(PlanType::names(), "Tipo de plano inválido")
}

fn plano_create() -> Vec<Field> {
    vec![
        Field::body("nome_plano")
            .trim()
            .not_empty("Nome do plano é obrigatório")
            .length(2, 255, "Nome deve ter entre 2 e 255 caracteres"),
        Field::body("codigo_operadora").optional().trim(),
        plan_type(),
        Field::body("valor_consulta_padrao")
            .optional()
            .float_min(0.0, "Valor da consulta deve ser um número positivo"),
    ]
}

fn plano_update() -> Vec<Field> {
    vec![
        id_param(),
        Field::body("nome_plano")
            .optional()
            .trim()
            .length(2, 255, "Nome deve ter entre 2 e 255 caracteres"),
        plan_type(),
    ]
}

fn honorario_create() -> Vec<Field> {
    let payload_statuses = PaymentStatus::PAYLOAD.iter().map(|s| s.as_str()).collect();

    vec![
        Field::body("consulta_id").int_min(1, "ID da consulta é obrigatório e deve ser válido"),
        Field::body("valor_bruto").float_min(0.0, "Valor bruto deve ser um número positivo"),
        Field::body("valor_glosa")
            .optional()
            .float_min(0.0, "Valor da glosa deve ser um número positivo"),
        Field::body("status")
            .optional()
            .one_of(payload_statuses, "Status inválido"),
    ]
}

fn honorario_update_status() -> Vec<Field> {
    vec![
        id_param(),
        Field::body("status_pagamento")
            .not_empty("Status é obrigatório")
            .one_of(PaymentStatus::names(), "Status inválido"),
        Field::body("data_pagamento")
            .optional_falsy()
            .iso8601("Data de pagamento inválida"),
    ]
}

fn honorario_update_glosa() -> Vec<Field> {
    vec![
        id_param(),
        Field::body("valor_glosa").float_min(0.0, "Valor da glosa deve ser um número positivo"),
        Field::body("motivo_glosa")
            .optional()
            .trim()
            .max_length(500, "Motivo da glosa deve ter no máximo 500 caracteres"),
    ]
}

fn password() -> Field {
    Field::body("senha")
        .not_empty("Senha é obrigatória")
        .min_length(6, "Senha deve ter no mínimo 6 caracteres")
}

fn auth_login() -> Vec<Field> {
    vec![
        Field::body("email")
            .trim()
            .not_empty("Email é obrigatório")
            .email("Email inválido")
            .normalize_email(),
        password(),
    ]
}

fn auth_create_user() -> Vec<Field> {
    vec![
        Field::body("nome")
            .trim()
            .not_empty("Nome é obrigatório")
            .length(3, 255, "Nome deve ter entre 3 e 255 caracteres"),
        Field::body("email")
            .trim()
            .not_empty("Email é obrigatório")
            .email("Email inválido")
            .normalize_email(),
        password().password_strength("Senha deve conter maiúsculas, minúsculas e números"),
        Field::body("role")
            .optional()
            .one_of(Role::names(), "Role inválido (deve ser ADMIN ou OPERADOR)"),
    ]
}

fn query_pagination() -> Vec<Field> {
    vec![
        Field::query("page")
            .optional()
            .int_min(1, "Página deve ser um número positivo"),
        Field::query("limit")
            .optional()
            .int_range(1, 100, "Limite deve estar entre 1 e 100"),
    ]
}

fn query_date_range() -> Vec<Field> {
    vec![
        Field::query("dataInicio")
            .optional()
            .iso8601("Data de início inválida"),
        Field::query("dataFim")
            .optional()
            .iso8601("Data de fim inválida"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_validator_exists() {
        let options = ValidatorOptions { strict_cpf: true };
        for (entity, actions) in VALIDATORS {
            for action in *actions {
                assert!(
                    validator_for_with(entity, action, &options).is_some(),
                    "missing validator {}.{}",
                    entity,
                    action
                );
            }
        }
    }

    #[test]
    fn test_unknown_validator() {
        let options = ValidatorOptions { strict_cpf: true };
        assert!(validator_for_with("medico", "archive", &options).is_none());
        assert!(validator_for_with("usuario", "create", &options).is_none());
    }

    #[test]
    fn test_cnpj_is_not_checksummed() {
        assert!(checksum_cpf_or_cnpj("12345678000190"));
        assert!(checksum_cpf_or_cnpj("52998224725"));
        assert!(!checksum_cpf_or_cnpj("12345678900"));
    }
}
