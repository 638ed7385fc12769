// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::Event;

use crate::{ActiveFrame, ControlFlowExtended, InputDevice, KeyBindingMode, LockedOutputDevice,
            OutputDevice, PromptConfig, PromptRenderer, PromptSession, PromptStatus,
            PromptStyle, RenderedMessage, SecretPromptError, StyleClass, TTYResult,
            compose_message, get_terminal_width, is_prompt_interactive,
            lock_output_device_as_mut};

/// The devices used by [`SecretPrompt::execute()`]: `stdout` and the `crossterm`
/// event stream.
#[allow(missing_debug_implementations)]
pub struct DefaultIoDevices {
    pub output_device: OutputDevice,
    pub input_device: InputDevice,
}

impl Default for DefaultIoDevices {
    fn default() -> Self {
        let output_device = OutputDevice::new_stdout();
        let input_device = InputDevice::new_event_stream();
        DefaultIoDevices {
            output_device,
            input_device,
        }
    }
}

impl DefaultIoDevices {
    pub fn as_mut_tuple(&mut self) -> (&mut OutputDevice, &mut InputDevice) {
        (&mut self.output_device, &mut self.input_device)
    }
}

/// What the line editing layer is configured with, derived from [`PromptConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub key_binding_mode: KeyBindingMode,
    /// Always `true`, input is never echoed.
    pub is_password: bool,
    pub multiline: bool,
    pub validate_while_typing: bool,
    pub has_validator: bool,
    pub conceal_char: char,
    /// `class:input`.
    pub input_style_class: String,
}

/// Enables raw mode for real terminals and restores it on drop, including when the
/// [`SecretPrompt::run()`] future is dropped before it completes.
#[derive(Debug)]
pub struct RawModeGuard {
    is_enabled: bool,
}

impl RawModeGuard {
    /// Mock devices leave the real terminal alone.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled.
    pub fn try_new(output_device: &OutputDevice) -> std::io::Result<Self> {
        if output_device.is_mock {
            return Ok(Self { is_enabled: false });
        }
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self { is_enabled: true })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.is_enabled {
            crossterm::terminal::disable_raw_mode().ok();
        }
    }
}

/// An async, masked ("secret") prompt. It asks one question, conceals what is typed,
/// gates the answer on an optional validator, and can only be run once.
///
/// ```no_run
/// use secret_prompt::{MinLengthValidator, PromptConfig, SecretPrompt};
///
/// # async fn ask() -> miette::Result<()> {
/// let config = PromptConfig::new("Password:").with_validator(MinLengthValidator::new(8));
/// let mut prompt = SecretPrompt::try_new(config)?;
/// let password = prompt.execute().await?;
/// assert!(prompt.status().is_answered());
/// # drop(password);
/// # Ok(())
/// # }
/// ```
///
/// To drive it headlessly (eg: in tests) pass mock devices to [`SecretPrompt::run()`],
/// see [`crate::InputDeviceExtMock`] and [`crate::OutputDeviceExt`].
#[derive(Debug)]
pub struct SecretPrompt {
    config: PromptConfig,
    style: PromptStyle,
    status: PromptStatus,
    is_used: bool,
}

impl SecretPrompt {
    /// # Errors
    ///
    /// Returns [`SecretPromptError::Configuration`] if the configuration is invalid, see
    /// [`PromptConfig::try_resolve_style()`].
    pub fn try_new(config: PromptConfig) -> Result<Self, SecretPromptError> {
        let style = config.try_resolve_style()?;
        Ok(Self {
            config,
            style,
            status: PromptStatus::Unanswered,
            is_used: false,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PromptConfig { &self.config }

    #[must_use]
    pub fn status(&self) -> &PromptStatus { &self.status }

    /// Recomputed from the current status on every call.
    #[must_use]
    pub fn render_message(&self) -> RenderedMessage {
        compose_message(&self.config, &self.status)
    }

    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            key_binding_mode: self.config.editing_mode.key_binding_mode(),
            is_password: true,
            multiline: self.config.multiline,
            validate_while_typing: self.config.validate_while_typing,
            has_validator: self.config.maybe_validator.is_some(),
            conceal_char: self.config.conceal_char,
            input_style_class: StyleClass::Input.class_name(),
        }
    }

    /// Run the prompt against the real terminal.
    ///
    /// # Errors
    ///
    /// Returns [`SecretPromptError::NotInteractive`] if `stdin` or `stdout` is piped,
    /// and otherwise the same errors as [`SecretPrompt::run()`].
    pub async fn execute(&mut self) -> Result<String, SecretPromptError> {
        if let TTYResult::IsNotInteractive = is_prompt_interactive() {
            return Err(SecretPromptError::NotInteractive);
        }
        let mut io_devices = DefaultIoDevices::default();
        self.run(io_devices.as_mut_tuple()).await
    }

    /// Draw the prompt, read key events until an answer is accepted or the session
    /// ends, then redraw the prompt in its final form. The devices are borrowed, and
    /// are not closed.
    ///
    /// # Errors
    ///
    /// - [`SecretPromptError::SessionAlreadyUsed`] if this prompt has already run.
    /// - [`SecretPromptError::Interrupted`] on <kbd>Ctrl+C</kbd>.
    /// - [`SecretPromptError::TransportEof`] if the input ends first.
    /// - [`SecretPromptError::Io`] if reading or writing the terminal fails before an
    ///   answer is accepted. Once accepted, the answer is returned even if the final
    ///   redraw fails.
    pub async fn run(
        &mut self,
        io: (&mut OutputDevice, &mut InputDevice),
    ) -> Result<String, SecretPromptError> {
        if self.is_used {
            return Err(SecretPromptError::SessionAlreadyUsed);
        }
        self.is_used = true;

        let (output_device, input_device) = io;
        let _raw_mode_guard = RawModeGuard::try_new(output_device)?;

        let mut session = PromptSession::new(&self.config);
        let mut renderer = PromptRenderer::new(get_terminal_width());

        tracing::debug!(
            editing_mode = %self.config.editing_mode,
            has_default = !self.config.default.is_empty(),
            has_validator = self.config.maybe_validator.is_some(),
            "secret prompt session started"
        );

        self.render_active(&session, &mut renderer, output_device)?;

        let outcome = loop {
            let Some(maybe_event) = input_device.next().await else {
                break Err(SecretPromptError::TransportEof);
            };

            match maybe_event {
                Ok(Event::Key(key_event)) => match session.apply_key_event(&key_event) {
                    ControlFlowExtended::ReturnOk(answer) => break Ok(answer),
                    ControlFlowExtended::ReturnError(error) => break Err(error),
                    ControlFlowExtended::Continue => {}
                },
                Ok(Event::Paste(text)) => session.apply_paste(&text),
                Ok(Event::Resize(columns, _rows)) => renderer.set_term_cols(columns),
                Ok(_) => continue,
                Err(error) => break Err(SecretPromptError::Io(error)),
            }

            self.render_active(&session, &mut renderer, output_device)?;
        };

        match &outcome {
            Ok(answer) => {
                self.status = PromptStatus::Answered(answer.clone());
                tracing::debug!("secret prompt answered");
            }
            Err(error) => tracing::debug!(%error, "secret prompt abandoned"),
        }

        // An accepted answer is returned even if the terminal can't show it.
        if let Err(error) = self.render_final(&mut renderer, output_device) {
            tracing::warn!(%error, "secret prompt final render failed");
        }

        outcome
    }

    fn render_active(
        &self,
        session: &PromptSession,
        renderer: &mut PromptRenderer,
        output_device: &OutputDevice,
    ) -> std::io::Result<()> {
        let message = self.render_message();
        let masked_input = session.line_state.masked_view();
        let frame = ActiveFrame {
            message: &message,
            masked_input: &masked_input,
            masked_cursor_offset: session.line_state.masked_cursor_offset(),
            maybe_annotation: session
                .maybe_error_annotation
                .as_ref()
                .map(|it| it.message.as_str()),
        };
        let term: LockedOutputDevice<'_> = lock_output_device_as_mut!(output_device);
        renderer.render_active(term, &self.style, frame)
    }

    fn render_final(
        &self,
        renderer: &mut PromptRenderer,
        output_device: &OutputDevice,
    ) -> std::io::Result<()> {
        let message = self.render_message();
        let term: LockedOutputDevice<'_> = lock_output_device_as_mut!(output_device);
        renderer.render_final(term, &self.style, &message)
    }
}
