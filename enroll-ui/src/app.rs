//! Terminal front end for the enrollment wizard.
//!
//! Presentation only: every rule lives in enroll-core. This loop prints
//! the current step's prompts, funnels answers through
//! [`Wizard::update`], and lets the orchestrator decide whether the
//! applicant may move on.

use std::io;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use enroll_core::calculations::{
    self, WorkerProfile, estimate_monthly_savings, generate_quotes, subsidy_level,
};
use enroll_core::calculations::common::{format_currency, format_phone, format_ssn};
use enroll_core::lookup::ZipLookupClient;
use enroll_core::models::{
    Gender, HouseholdMember, MemberType, QualifyingEvent, StepId, TobaccoStatus, WorkType,
};
use enroll_core::prefill;
use enroll_core::wizard::{AutosaveStatus, SubmissionState, Wizard};

use crate::prompts::{Answer, answer_is_yes, ask, ask_amount, ask_bool, ask_choice, ask_date};

enum Nav {
    Next,
    Back,
    Quit,
}

pub struct App {
    wizard: Wizard,
    zip_lookup: ZipLookupClient,
}

impl App {
    pub fn new(wizard: Wizard) -> Self {
        Self {
            wizard,
            zip_lookup: ZipLookupClient::default(),
        }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        if self.wizard.resume().await {
            println!(
                "Welcome back! Resuming your saved application at step {} of {}.",
                self.wizard.step().ordinal(),
                StepId::TOTAL
            );
        }

        loop {
            self.print_header();

            match self.run_step().await? {
                Nav::Quit => {
                    // Let a pending autosave land before exiting.
                    self.wizard.flush_autosave().await;
                    println!("Your progress is saved for 24 hours. See you soon!");
                    return Ok(());
                }
                Nav::Back => self.wizard.retreat(),
                Nav::Next if self.wizard.step().is_last() => {
                    if self.submit_flow().await? {
                        return Ok(());
                    }
                }
                Nav::Next => {
                    if self.wizard.advance(Self::today()).is_err() {
                        self.print_errors();
                    }
                }
            }
        }
    }

    fn print_header(&self) {
        let step = self.wizard.step();
        let autosave = match self.wizard.autosave_status() {
            AutosaveStatus::Idle => "",
            AutosaveStatus::Pending => "  (saving...)",
            AutosaveStatus::Saved => "  (progress saved)",
            AutosaveStatus::Error => "  (autosave unavailable)",
        };
        println!();
        println!(
            "=== Step {} of {}: {}{autosave} ===",
            step.ordinal(),
            StepId::TOTAL,
            step.title()
        );
    }

    fn print_errors(&self) {
        if !self.wizard.show_errors() {
            return;
        }
        println!("Please fix the following before continuing:");
        for error in self.wizard.errors() {
            println!("  - {error}");
        }
    }

    async fn run_step(&mut self) -> io::Result<Nav> {
        match self.wizard.step() {
            StepId::PersonalInfo => self.personal_info_step(),
            StepId::Eligibility => self.eligibility_step(),
            StepId::Address => self.address_step().await,
            StepId::Household => self.household_step(),
            StepId::Income => self.income_step(),
            StepId::SpecialEnrollment => self.sep_step(),
            StepId::PlanSelection => self.plan_step(),
            StepId::Review => self.review_step(),
        }
    }

    /// Trailing navigation prompt shared by every step.
    fn nav(&self) -> io::Result<Nav> {
        loop {
            match ask("[Enter continue / b back / q quit]", "")? {
                Answer::Keep => return Ok(Nav::Next),
                Answer::Back => return Ok(Nav::Back),
                Answer::Value(v) => match v.as_str() {
                    "b" => return Ok(Nav::Back),
                    "q" => return Ok(Nav::Quit),
                    "c" | "continue" => return Ok(Nav::Next),
                    _ => println!("  Enter to continue, b to go back, q to quit"),
                },
            }
        }
    }

    fn set_text(
        &mut self,
        answer: Answer,
        set: impl FnOnce(&mut enroll_core::models::FormData, String),
    ) {
        if let Answer::Value(value) = answer {
            self.wizard.update(|form| set(form, value));
        }
    }

    fn personal_info_step(&mut self) -> io::Result<Nav> {
        let a = ask("First name", &self.wizard.form().first_name)?;
        self.set_text(a, |f, v| f.first_name = v);

        let a = ask("Last name", &self.wizard.form().last_name)?;
        self.set_text(a, |f, v| f.last_name = v);

        let a = ask("Email", &self.wizard.form().email)?;
        self.set_text(a, |f, v| f.email = v);

        let a = ask("Phone", &self.wizard.form().phone)?;
        self.set_text(a, |f, v| f.phone = format_phone(&v));

        self.nav()
    }

    fn eligibility_step(&mut self) -> io::Result<Nav> {
        let dob = ask_date("Date of birth", self.wizard.form().date_of_birth)?;
        self.wizard.update(|f| f.date_of_birth = dob);

        let a = ask("Social Security number", &self.wizard.form().ssn)?;
        self.set_text(a, |f, v| f.ssn = format_ssn(&v));

        let current = self.wizard.form().tobacco_status == Some(TobaccoStatus::Yes);
        let a = ask_bool("Tobacco use in the last 12 months", current)?;
        if let Answer::Value(_) = a {
            let status = if answer_is_yes(&a) {
                TobaccoStatus::Yes
            } else {
                TobaccoStatus::No
            };
            self.wizard.update(|f| f.tobacco_status = Some(status));
        }

        self.nav()
    }

    async fn address_step(&mut self) -> io::Result<Nav> {
        let a = ask("ZIP code", &self.wizard.form().zip_code)?;
        if let Answer::Value(zip) = a {
            self.wizard.update(|f| f.zip_code = zip.clone());

            // Best effort; a miss leaves city/state as they were.
            if let Some(location) = self.zip_lookup.lookup(&zip).await {
                println!("  found {}, {}", location.city, location.state);
                self.wizard.update(|f| {
                    f.city = location.city;
                    f.state = location.state;
                });
            }
        }

        let a = ask("Street address", &self.wizard.form().street_address)?;
        self.set_text(a, |f, v| f.street_address = v);

        let a = ask("Apartment/unit (optional)", &self.wizard.form().apartment_unit)?;
        self.set_text(a, |f, v| f.apartment_unit = v);

        let a = ask("City", &self.wizard.form().city)?;
        self.set_text(a, |f, v| f.city = v);

        let a = ask("State (two letters)", &self.wizard.form().state)?;
        self.set_text(a, |f, v| f.state = v.to_ascii_uppercase());

        self.nav()
    }

    fn household_step(&mut self) -> io::Result<Nav> {
        let count = self.wizard.form().household_members.len();
        println!("Household members on the application: {count}");

        loop {
            let a = ask_bool("Add a household member", false)?;
            if !answer_is_yes(&a) {
                break;
            }

            let member_type = ask_choice(
                "Member type",
                &[
                    (MemberType::Spouse, MemberType::Spouse.label()),
                    (MemberType::Dependent, MemberType::Dependent.label()),
                ],
                None,
            )?
            .unwrap_or(MemberType::Dependent);

            let mut member = HouseholdMember::new(member_type);

            if let Answer::Value(v) = ask("  First name", "")? {
                member.first_name = v;
            }
            if let Answer::Value(v) = ask("  Last name", "")? {
                member.last_name = v;
            }
            member.date_of_birth = ask_date("  Date of birth", None)?;
            member.gender = ask_choice(
                "  Gender",
                &[
                    (Gender::Female, "Female"),
                    (Gender::Male, "Male"),
                    (Gender::Other, "Other / prefer not to say"),
                ],
                None,
            )?;

            let a = ask_bool("  Applying for coverage", true)?;
            member.is_applying_for_coverage = !matches!(&a, Answer::Value(v) if v == "n");
            if member.is_applying_for_coverage {
                if let Answer::Value(v) = ask("  Social Security number", "")? {
                    member.ssn = format_ssn(&v);
                }
                let a = ask_bool("  Tobacco use (adults only)", false)?;
                if let Answer::Value(_) = a {
                    member.tobacco_status = Some(if answer_is_yes(&a) {
                        TobaccoStatus::Yes
                    } else {
                        TobaccoStatus::No
                    });
                }
            }

            let a = ask_bool("  Denied Medicaid/CHIP recently", false)?;
            if answer_is_yes(&a) {
                member.medicaid_denied = true;
                member.medicaid_denied_date = ask_date("  Date of denial", None)?;
            }

            self.wizard.update(|f| f.household_members.push(member));
        }

        self.nav()
    }

    fn income_step(&mut self) -> io::Result<Nav> {
        let work_types: Vec<(WorkType, &str)> =
            WorkType::ALL.iter().map(|w| (*w, w.label())).collect();

        let current = self.wizard.form().income.primary_income_type;
        let picked = ask_choice("Primary income type", &work_types, current)?;
        self.wizard.update(|f| f.income.primary_income_type = picked);

        // Demo sugar: offer a plausible figure when nothing is entered yet.
        if self.wizard.form().income.total_annual_income == Decimal::ZERO {
            if let Some(work_type) = picked {
                let weekly = prefill::suggest_weekly_income(&mut rand::rng(), work_type);
                println!(
                    "  workers like you typically report about {}/year",
                    format_currency(weekly * Decimal::from(52))
                );
            }
        }

        let total = ask_amount(
            "Total annual household income",
            self.wizard.form().income.total_annual_income,
        )?;
        self.wizard.update(|f| {
            f.income.total_annual_income = total;
            f.income.redistribute();
        });

        let a = ask_bool("Two earners in the household", self.wizard.form().income.is_dual_income)?;
        if let Answer::Value(_) = a {
            let dual = answer_is_yes(&a);
            self.wizard.update(|f| {
                f.income.is_dual_income = dual;
                f.income.redistribute();
            });
        }
        if self.wizard.form().income.is_dual_income {
            let primary = ask_amount(
                "Your share of that income",
                self.wizard.form().income.primary_income_amount,
            )?;
            self.wizard.update(|f| f.income.set_primary_amount(primary));
        }

        let household_size = self.wizard.form().household_size();
        let level = subsidy_level(total, household_size);
        let savings = estimate_monthly_savings(total, household_size);
        self.wizard.update(|f| f.income.current_range = Some(level));
        println!(
            "  estimated subsidy outlook: {} (~{}/month off)",
            level.label(),
            format_currency(savings)
        );

        self.nav()
    }

    fn sep_step(&mut self) -> io::Result<Nav> {
        let a = ask_bool("Are you enrolling during Open Enrollment", false)?;
        if answer_is_yes(&a) {
            self.wizard.update(|f| {
                f.sep.categories = vec![QualifyingEvent::OpenEnrollment];
                f.sep.is_eligible = true;
                f.sep.event_type = None;
                f.sep.event_date = None;
            });
            return self.nav();
        }

        let events: Vec<(QualifyingEvent, &str)> = [
            QualifyingEvent::LostCoverage,
            QualifyingEvent::Moved,
            QualifyingEvent::Married,
            QualifyingEvent::Divorced,
            QualifyingEvent::BirthOrAdoption,
            QualifyingEvent::MedicaidDenial,
            QualifyingEvent::NoneApply,
        ]
        .into_iter()
        .map(|event| (event, event.label()))
        .collect();
        let picked = ask_choice("Qualifying life event", &events, self.wizard.form().sep.event_type)?;

        match picked {
            Some(QualifyingEvent::NoneApply) | None => {
                self.wizard.update(|f| {
                    f.sep.categories = vec![QualifyingEvent::NoneApply];
                    f.sep.is_eligible = false;
                });
            }
            Some(event) => {
                let date = ask_date("Date of the event", self.wizard.form().sep.event_date)?;
                let a = ask_bool(
                    "Do you have documentation of the event",
                    self.wizard.form().sep.has_documentation,
                )?;
                let documented = if matches!(a, Answer::Value(_)) {
                    Some(answer_is_yes(&a))
                } else {
                    None
                };
                self.wizard.update(|f| {
                    f.sep.categories = vec![event];
                    f.sep.event_type = Some(event);
                    f.sep.event_date = date;
                    if let Some(documented) = documented {
                        f.sep.has_documentation = documented;
                    }
                    f.sep.is_eligible = true;
                });
            }
        }

        self.nav()
    }

    fn plan_step(&mut self) -> io::Result<Nav> {
        let budget = ask_amount("Monthly budget, 0 for no limit", Decimal::ZERO)?;

        let form = self.wizard.form();
        let profile = WorkerProfile {
            weekly_income: (form.income.total_annual_income / Decimal::from(52)).round_dp(2),
            state: form.state.clone(),
            work_type: form.income.primary_income_type.unwrap_or(WorkType::Other),
            age: form
                .date_of_birth
                .map(|dob| calculations::age_on(dob, Self::today())),
            budget_ceiling: (budget > Decimal::ZERO).then_some(budget),
        };

        match generate_quotes(&profile) {
            Ok(quotes) => {
                println!("Plans for your profile, best effective rate first:");
                println!();
                for (i, quote) in quotes.iter().enumerate() {
                    println!(
                        "  {}. {} ({} - {})",
                        i + 1,
                        quote.plan.name,
                        quote.plan.metal_level.label(),
                        quote.plan.carrier
                    );
                    println!(
                        "     ${}/mo   deductible {}   est. tax deduction {}/yr   effective ${}/mo",
                        quote.monthly_premium,
                        format_currency(quote.plan.annual_deductible),
                        format_currency(quote.tax_deduction),
                        quote.effective_monthly_rate
                    );
                    if quote.monthly_savings > Decimal::ZERO {
                        println!(
                            "     budget-adjusted: saves ${}/mo off the ${} list rate",
                            quote.monthly_savings, quote.original_premium
                        );
                    }
                }
                println!();

                let options: Vec<(&str, &str)> =
                    quotes.iter().map(|q| (q.plan.id, q.plan.name)).collect();
                let current = self.wizard.form().selected_plan_id.clone();
                let picked = ask_choice("Choose a plan", &options, current.as_deref())?;
                if let Some(id) = picked {
                    self.wizard
                        .update(|f| f.selected_plan_id = Some(id.to_string()));
                }
            }
            Err(error) => {
                tracing::warn!(%error, "quote generation failed");
                println!("We could not price plans with the income entered; please go back.");
            }
        }

        self.nav()
    }

    fn review_step(&mut self) -> io::Result<Nav> {
        let form = self.wizard.form();
        println!("Applicant:   {} {}", form.first_name, form.last_name);
        println!("Contact:     {}  {}", form.email, form.phone);
        println!(
            "Address:     {}, {}, {} {}",
            form.street_address, form.city, form.state, form.zip_code
        );
        println!("Household:   {} people", form.household_size());
        println!(
            "Income:      {}/year",
            format_currency(form.income.total_annual_income)
        );
        if let Some(id) = &form.selected_plan_id {
            if let Some(plan) = calculations::plan_by_id(id) {
                println!("Plan:        {} ({})", plan.name, plan.metal_level.label());
            }
        }
        println!();

        let a = ask_bool("Accept the terms of service", form.consent.terms_accepted)?;
        if let Answer::Value(_) = a {
            let accepted = answer_is_yes(&a);
            self.wizard.update(|f| f.consent.terms_accepted = accepted);
        }
        let a = ask_bool(
            "Accept the privacy policy",
            self.wizard.form().consent.privacy_accepted,
        )?;
        if let Answer::Value(_) = a {
            let accepted = answer_is_yes(&a);
            self.wizard.update(|f| f.consent.privacy_accepted = accepted);
        }
        let a = ask_bool(
            "May we send occasional plan updates (optional)",
            self.wizard.form().consent.marketing_accepted,
        )?;
        if let Answer::Value(_) = a {
            let accepted = answer_is_yes(&a);
            self.wizard.update(|f| f.consent.marketing_accepted = accepted);
        }

        let a = ask("Type your full name to sign", &self.wizard.form().consent.signature)?;
        self.set_text(a, |f, v| f.consent.signature = v);

        self.nav()
    }

    /// Runs the submit state machine from the review step. Returns true
    /// when the session is finished (confirmation shown or user gave up).
    async fn submit_flow(&mut self) -> anyhow::Result<bool> {
        loop {
            println!("Submitting your application...");
            match self.wizard.submit(Self::today()).await {
                Ok(confirmation) => {
                    println!();
                    println!("Application received!");
                    println!("Confirmation id: {}", confirmation.confirmation_id);
                    println!("A licensed agent will reach out within one business day.");
                    tokio::time::sleep(self.wizard.config().success_display).await;
                    self.wizard.acknowledge();
                    return Ok(true);
                }
                Err(error) => {
                    if matches!(self.wizard.submission(), &SubmissionState::Error(_)) {
                        println!("Submission failed: {error}");
                        let a = ask_bool("Try again", true)?;
                        if answer_is_yes(&a) || matches!(a, Answer::Keep) {
                            self.wizard.retry();
                            continue;
                        }
                        return Ok(false);
                    }
                    // Validation or step-gating problem: surface and let
                    // the user fix the form.
                    println!("Cannot submit yet: {error}");
                    self.print_errors();
                    return Ok(false);
                }
            }
        }
    }
}
