//! Interactive login / registration screen.

use std::fmt;

use anyhow::Result;
use clima_core::{SessionError, SessionGate};
use inquire::{Password, Select, Text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

/// Entries of the welcome menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Submit(Mode),
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Submit(Mode::Login) => "Iniciar sesión",
            MenuItem::Submit(Mode::Register) => "Registrarse",
            MenuItem::Quit => "Salir",
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Granted,
    Registered,
    /// Field messages, shown inline.
    Invalid(Vec<String>),
    /// Blocking notice.
    Denied(String),
}

fn submit(gate: &mut SessionGate, mode: Mode, identity: &str, secret: &str) -> Outcome {
    let result = match mode {
        Mode::Login => gate.authenticate(identity, secret).map(|()| Outcome::Granted),
        Mode::Register => gate.register(identity, secret).map(|()| Outcome::Registered),
    };

    match result {
        Ok(outcome) => outcome,
        Err(SessionError::Invalid(errors)) => {
            Outcome::Invalid(errors.iter().map(ToString::to_string).collect())
        }
        Err(SessionError::Auth(err)) => Outcome::Denied(err.to_string()),
    }
}

/// Loop until the user logs in (`true`) or chooses to quit (`false`).
pub fn run(gate: &mut SessionGate) -> Result<bool> {
    loop {
        let menu = vec![
            MenuItem::Submit(Mode::Login),
            MenuItem::Submit(Mode::Register),
            MenuItem::Quit,
        ];
        let MenuItem::Submit(mode) = Select::new("Bienvenido", menu).prompt()? else {
            return Ok(false);
        };

        let identity = Text::new("Correo electrónico:").prompt()?;
        let secret = Password::new("Contraseña:").without_confirmation().prompt()?;

        match submit(gate, mode, identity.trim(), &secret) {
            Outcome::Granted => return Ok(true),
            Outcome::Registered => {
                println!("Éxito: Cuenta creada correctamente. Ahora inicia sesión.");
            }
            Outcome::Invalid(messages) => {
                for message in messages {
                    println!("  ✗ {message}");
                }
            }
            Outcome::Denied(message) => {
                println!("Error: {message}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clima_core::UserStore;

    #[test]
    fn register_then_login() {
        let mut gate = SessionGate::new(UserStore::new());

        assert_eq!(submit(&mut gate, Mode::Register, "a@b.com", "Password1!"), Outcome::Registered);
        assert_eq!(submit(&mut gate, Mode::Login, "a@b.com", "Password1!"), Outcome::Granted);
        assert_eq!(
            submit(&mut gate, Mode::Register, "a@b.com", "Password1!"),
            Outcome::Denied("Este correo ya está registrado.".into())
        );
    }

    #[test]
    fn wrong_secret_and_unknown_identity_are_distinguished() {
        let mut gate = SessionGate::new(UserStore::with_demo_user());

        assert_eq!(
            submit(&mut gate, Mode::Login, "usuario@prueba.com", "Password2!"),
            Outcome::Denied("Contraseña incorrecta.".into())
        );
        assert_eq!(
            submit(&mut gate, Mode::Login, "otro@prueba.com", "Password1!"),
            Outcome::Denied("El correo no existe. Regístrate primero.".into())
        );
    }

    #[test]
    fn invalid_fields_are_listed() {
        let mut gate = SessionGate::new(UserStore::new());

        let Outcome::Invalid(messages) = submit(&mut gate, Mode::Login, "nope", "abc") else {
            panic!("expected field errors");
        };
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "Ingresa un correo válido.");
    }
}
