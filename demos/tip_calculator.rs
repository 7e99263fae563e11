use crate::mini_salsa::{run, setup_logging, App, Ctx};
use crossterm::event::Event;
use log::{debug, warn};
use rat_number_field::deferred::{Deferred, DeferredQueue};
use rat_number_field::event::{HandleEvent, Outcome, Regular};
use rat_number_field::focus::{Focus, FocusBuilder, HasFocus};
use rat_number_field::formatter::{parse_locale_name, NumberFormatter, NumberStyle, StyleFormatter};
use rat_number_field::number_field::{NumberField, NumberFieldOutcome, NumberFieldState};
use rat_number_field::tip::TipCalculator;
use rat_number_field::{HasScreenCursor, Locale};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::StatefulWidget;
use ratatui::Frame;
use std::env;

mod mini_salsa;

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let config = RunConfig::from_env();
    debug!("{:?}", config);

    let queue = DeferredQueue::new();
    let calc = TipCalculator::new();

    let currency = StyleFormatter::new(NumberStyle::Currency, config.locale).lenient(true);
    let percent = StyleFormatter::new(NumberStyle::Percent, config.locale).lenient(true);

    let mut state = State {
        amount: NumberFieldState::new("Check Amount", &calc.amount, currency.clone(), &queue),
        rate: NumberFieldState::new("Tip Rate", &calc.rate, percent, &queue),
        currency,
        calc,
    };

    run("tip_calculator", &queue, &mut state)
}

/// Settings from the environment.
#[derive(Debug)]
struct RunConfig {
    locale: Locale,
}

impl RunConfig {
    /// The first of LC_ALL, LC_NUMERIC, LANG that names a known locale.
    /// The POSIX locale has no currency, it falls back to en_US too.
    fn from_env() -> Self {
        for var in ["LC_ALL", "LC_NUMERIC", "LANG"] {
            let Ok(name) = env::var(var) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            match parse_locale_name(&name) {
                Ok(Locale::POSIX) => {}
                Ok(locale) => return Self { locale },
                Err(e) => warn!("{}={}: {}", var, name, e),
            }
        }
        Self {
            locale: Locale::en_US,
        }
    }
}

struct State {
    calc: TipCalculator,
    currency: StyleFormatter,

    amount: NumberFieldState,
    rate: NumberFieldState,
}

impl State {
    // areas change with each render, the focus is rebuilt after.
    fn build_focus(&self, old: Option<Focus>) -> Focus {
        let mut builder = FocusBuilder::new(old);
        builder.widget(&self.amount);
        builder.widget(&self.rate);
        builder.build()
    }
}

impl App for State {
    fn init(&mut self, ctx: &mut Ctx) -> Result<(), anyhow::Error> {
        let focus = self.build_focus(None);
        focus.first();
        ctx.focus = Some(focus);
        Ok(())
    }

    fn render(
        &mut self,
        frame: &mut Frame<'_>,
        area: Rect,
        ctx: &mut Ctx,
    ) -> Result<(), anyhow::Error> {
        let l0 = Layout::horizontal([
            Constraint::Length(2),
            Constraint::Length(15),
            Constraint::Length(20),
            Constraint::Fill(1),
        ])
        .split(area);

        let l1 = Layout::vertical([Constraint::Length(1); 8]).split(area);

        let label = |row: usize| Rect::new(l0[1].x, l1[row].y, l0[1].width, 1);
        let field = |row: usize| Rect::new(l0[2].x, l1[row].y, l0[2].width, 1);

        let field_style = Style::new().black().on_gray();
        let focus_style = Style::new().black().on_light_cyan();
        let label_style = Style::new().dark_gray().on_gray();

        frame.render_widget(Line::from("Check Amount"), label(1));
        NumberField::new()
            .style(field_style)
            .focus_style(focus_style)
            .label_style(label_style)
            .render(field(1), frame.buffer_mut(), &mut self.amount);

        frame.render_widget(Line::from("Tip Rate"), label(3));
        NumberField::new()
            .style(field_style)
            .focus_style(focus_style)
            .label_style(label_style)
            .render(field(3), frame.buffer_mut(), &mut self.rate);

        frame.render_widget(Line::from("Tip Amount"), label(5));
        frame.render_widget(Line::from(show(&self.currency, self.calc.tip())), field(5));

        frame.render_widget(Line::from("Total"), label(6));
        frame.render_widget(Line::from(show(&self.currency, self.calc.total())), field(6));

        if let Some(cursor) = self
            .amount
            .screen_cursor()
            .or_else(|| self.rate.screen_cursor())
        {
            frame.set_cursor_position(cursor);
        }

        ctx.focus = Some(self.build_focus(ctx.focus.take()));

        let focused = if self.amount.is_focused() {
            self.amount.label()
        } else if self.rate.is_focused() {
            self.rate.label()
        } else {
            "-"
        };
        ctx.status = format!("Ctrl-Q to quit. | {}", focused);

        Ok(())
    }

    fn event(&mut self, event: &Event, ctx: &mut Ctx) -> Result<Outcome, anyhow::Error> {
        // the fields notice the focus change with this same event.
        let f = ctx.handle_focus(event);

        let r1 = self.amount.handle(event, Regular);
        let r2 = self.rate.handle(event, Regular);

        if r1 == NumberFieldOutcome::Value || r2 == NumberFieldOutcome::Value {
            debug!(
                "amount {:?} rate {:?} tip {:?} total {:?}",
                self.calc.amount.get(),
                self.calc.rate.get(),
                self.calc.tip(),
                self.calc.total()
            );
        }

        Ok(f.max(r1.into()).max(r2.into()))
    }

    fn deferred(&mut self, task: &Deferred, _ctx: &mut Ctx) -> Result<Outcome, anyhow::Error> {
        if self.amount.is_target_of(task) {
            Ok(self.amount.apply_deferred(task))
        } else {
            Ok(self.rate.apply_deferred(task))
        }
    }
}

fn show(fmt: &StyleFormatter, value: Option<f64>) -> String {
    value
        .and_then(|v| fmt.render(v))
        .unwrap_or_else(|| "-".to_string())
}
