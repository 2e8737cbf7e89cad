//! Renders a policy [`Conjunction`] as a SQL WHERE clause
//!
//! Every value is bound as a parameter. An empty conjunction renders
//! nothing, so the query is unconstrained.

use domain_policy::{Conjunction, PolicyPredicate};
use sqlx::{Postgres, QueryBuilder};

use crate::mapping::{domain_to_db_policy_status, domain_to_db_policy_type};

/// Appends ` WHERE t1 AND t2 ...` for the terms of `conjunction`
pub fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, conjunction: &Conjunction) {
    let mut has_where = false;
    for term in conjunction.terms() {
        push_condition(builder, &mut has_where);
        push_term(builder, term);
    }
}

fn push_term(builder: &mut QueryBuilder<'_, Postgres>, term: &PolicyPredicate) {
    match term {
        PolicyPredicate::EffectiveOnOrAfter(at) => {
            builder.push("policy.effective_date >= ").push_bind(*at);
        }
        PolicyPredicate::EffectiveOnOrBefore(at) => {
            builder.push("policy.effective_date <= ").push_bind(*at);
        }
        PolicyPredicate::ExpiresOnOrAfter(at) => {
            builder.push("policy.expiration_date >= ").push_bind(*at);
        }
        PolicyPredicate::ExpiresOnOrBefore(at) => {
            builder.push("policy.expiration_date <= ").push_bind(*at);
        }
        PolicyPredicate::PolicyholderIdNumber(id_number) => {
            builder
                .push(
                    "EXISTS (SELECT 1 FROM person AS holder \
                     WHERE holder.id = policy.policyholder_id AND holder.id_number = ",
                )
                .push_bind(id_number.clone())
                .push(")");
        }
        PolicyPredicate::PolicyNumberContains(fragment) => {
            // strpos keeps the match literal; LIKE would treat % and _ as wildcards
            builder
                .push("strpos(policy.policy_number, ")
                .push_bind(fragment.clone())
                .push(") > 0");
        }
        PolicyPredicate::TypeIs(policy_type) => {
            builder
                .push("policy.type = ")
                .push_bind(domain_to_db_policy_type(*policy_type));
        }
        PolicyPredicate::StatusIs(status) => {
            builder
                .push("policy.status = ")
                .push_bind(domain_to_db_policy_status(*status));
        }
    }
}

fn push_condition(builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool) {
    if *has_where {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_where = true;
    }
}
