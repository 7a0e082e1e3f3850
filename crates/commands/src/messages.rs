//! Localized response catalog
//!
//! Every user-facing sentence a handler can produce lives here, in Russian
//! and English. Handlers only decide which one to use and fill the blanks.

use chrono::{DateTime, Datelike, Timelike, Utc};
use voice_ci_core::Locale;

const MONTHS_RU: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Message catalog for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    locale: Locale,
}

/// Job fields rendered by `job_info`, already stringified
#[derive(Debug, Clone)]
pub struct JobInfoView {
    pub name: String,
    pub description: String,
    pub url: String,
    pub buildable: String,
    pub color: String,
    pub first_build: String,
    pub last_build: String,
    pub last_completed_build: String,
    pub last_failed_build: String,
    pub last_stable_build: String,
    pub last_successful_build: String,
    pub last_unstable_build: String,
    pub last_unsuccessful_build: String,
    pub next_build_number: String,
    pub concurrent_build: String,
}

/// Build fields rendered by `build_info`, already stringified
#[derive(Debug, Clone)]
pub struct BuildInfoView {
    pub number: String,
    pub result: String,
    pub url: String,
    pub started: String,
    pub duration: String,
    pub building: bool,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn ru(&self) -> bool {
        self.locale == Locale::Russian
    }

    // Placeholders

    pub fn no_information(&self) -> &'static str {
        if self.ru() {
            "Нет информации"
        } else {
            "No information"
        }
    }

    pub fn no_description(&self) -> &'static str {
        if self.ru() {
            "Нет описания"
        } else {
            "No description"
        }
    }

    pub fn no_url(&self) -> &'static str {
        if self.ru() {
            "URL не указан"
        } else {
            "URL not set"
        }
    }

    pub fn unknown(&self) -> &'static str {
        if self.ru() {
            "Неизвестно"
        } else {
            "Unknown"
        }
    }

    pub fn yes_no(&self, value: bool) -> &'static str {
        match (self.ru(), value) {
            (true, true) => "да",
            (true, false) => "нет",
            (false, true) => "yes",
            (false, false) => "no",
        }
    }

    pub fn in_progress(&self) -> &'static str {
        if self.ru() {
            "В процессе"
        } else {
            "In progress"
        }
    }

    // Canned responses

    pub fn unknown_action(&self) -> String {
        if self.ru() {
            "Простите, не понял ваш запрос".to_string()
        } else {
            "Sorry, I did not understand your request".to_string()
        }
    }

    pub fn job_not_found(&self, job: &str) -> String {
        if self.ru() {
            format!("Задача с именем {} не существует.", job)
        } else {
            format!("Job named {} does not exist.", job)
        }
    }

    pub fn build_not_found(&self, job: &str, number: u32) -> String {
        if self.ru() {
            format!("Сборка {} задачи {} не найдена.", number, job)
        } else {
            format!("Build {} of job {} was not found.", number, job)
        }
    }

    pub fn missing_job_name(&self) -> String {
        if self.ru() {
            "Назовите, пожалуйста, имя задачи.".to_string()
        } else {
            "Please name the job.".to_string()
        }
    }

    pub fn missing_build_number(&self) -> String {
        if self.ru() {
            "Назовите, пожалуйста, номер сборки.".to_string()
        } else {
            "Please name the build number.".to_string()
        }
    }

    pub fn invalid_build_number(&self, raw: &str) -> String {
        if self.ru() {
            format!("Не понимаю номер сборки {}.", raw)
        } else {
            format!("I cannot read build number {}.", raw)
        }
    }

    pub fn missing_parameter_name(&self) -> String {
        if self.ru() {
            "Назовите, пожалуйста, имя параметра.".to_string()
        } else {
            "Please name the parameter.".to_string()
        }
    }

    pub fn provider_error(&self, error: &str) -> String {
        if self.ru() {
            format!("Ошибка: {}", error)
        } else {
            format!("Error: {}", error)
        }
    }

    // Server

    pub fn server_info(
        &self,
        version: &str,
        mode: &str,
        executors: &str,
        quieting_down: bool,
        jobs: &[String],
    ) -> String {
        let jobs = jobs.join(", ");
        if self.ru() {
            let state = if quieting_down {
                "Сервер сейчас приглушается. "
            } else {
                "Сервер работает в обычном режиме. "
            };
            format!(
                "Сервер Jenkins версии {} работает в режиме {} с {} исполнителями. \
                 {}Сейчас на сервере есть следующие задачи: {}.",
                version, mode, executors, state, jobs
            )
        } else {
            let state = if quieting_down {
                "The server is quieting down. "
            } else {
                "The server is running normally. "
            };
            format!(
                "Jenkins server version {} runs in {} mode with {} executors. \
                 {}The server currently has these jobs: {}.",
                version, mode, executors, state, jobs
            )
        }
    }

    pub fn all_jobs(&self, jobs: &[String]) -> String {
        let prefix = if self.ru() {
            "Представляю вам список задач на сервере Jenkins: "
        } else {
            "Here are the jobs on the Jenkins server: "
        };
        format!("{}{}", prefix, jobs.join(", "))
    }

    // Jobs

    pub fn job_info(&self, job: &JobInfoView) -> String {
        let labels: [&str; 15] = if self.ru() {
            [
                "Информация о задаче",
                "Описание",
                "URL",
                "Возможность запуска сборки",
                "Статус",
                "Первая сборка",
                "Последняя сборка",
                "Последняя завершенная сборка",
                "Последняя неудачная сборка",
                "Последняя стабильная сборка",
                "Последняя успешная сборка",
                "Последняя нестабильная сборка",
                "Последняя неуспешная сборка",
                "Номер следующей сборки",
                "Можно ли запустить параллельные сборки",
            ]
        } else {
            [
                "Information about job",
                "Description",
                "URL",
                "Buildable",
                "Status",
                "First build",
                "Last build",
                "Last completed build",
                "Last failed build",
                "Last stable build",
                "Last successful build",
                "Last unstable build",
                "Last unsuccessful build",
                "Next build number",
                "Concurrent builds allowed",
            ]
        };
        let values = [
            &job.description,
            &job.url,
            &job.buildable,
            &job.color,
            &job.first_build,
            &job.last_build,
            &job.last_completed_build,
            &job.last_failed_build,
            &job.last_stable_build,
            &job.last_successful_build,
            &job.last_unstable_build,
            &job.last_unsuccessful_build,
            &job.next_build_number,
            &job.concurrent_build,
        ];

        let mut out = format!("{} {}:\n", labels[0], job.name);
        for (label, value) in labels[1..].iter().zip(values) {
            out.push_str(&format!("{}: {}.\n", label, value));
        }
        out
    }

    pub fn job_triggered(&self, job: &str) -> String {
        if self.ru() {
            format!("Задача {} была запущена.", job)
        } else {
            format!("Job {} was started.", job)
        }
    }

    pub fn trigger_failed(&self, job: &str, error: &str) -> String {
        if self.ru() {
            format!("Произошла ошибка при запуске задачи {}: {}", job, error)
        } else {
            format!("Failed to start job {}: {}", job, error)
        }
    }

    pub fn job_parameters(&self, parameters: &[(String, String)]) -> String {
        if parameters.is_empty() {
            return if self.ru() {
                "Для этой задачи не определены параметры.".to_string()
            } else {
                "This job has no parameters.".to_string()
            };
        }
        let mut out = if self.ru() {
            "Параметры задачи:\n".to_string()
        } else {
            "Job parameters:\n".to_string()
        };
        for (name, description) in parameters {
            out.push_str(&format!("{}: {}.\n", name, description));
        }
        out
    }

    pub fn parameter_value(&self, name: &str, value: &str) -> String {
        if self.ru() {
            format!("Значение параметра {}: {}", name, value)
        } else {
            format!("Value of parameter {}: {}", name, value)
        }
    }

    pub fn parameter_without_default(&self, name: &str) -> String {
        if self.ru() {
            format!("Параметр {} не имеет значения по умолчанию.", name)
        } else {
            format!("Parameter {} has no default value.", name)
        }
    }

    pub fn parameter_not_found(&self) -> String {
        if self.ru() {
            "Параметр с таким именем не найден.".to_string()
        } else {
            "No parameter with that name was found.".to_string()
        }
    }

    // Builds

    pub fn build_stopped(&self, job: &str, number: u32) -> String {
        if self.ru() {
            format!("Сборка {} задачи {} была остановлена.", number, job)
        } else {
            format!("Build {} of job {} was stopped.", number, job)
        }
    }

    pub fn stop_failed(&self, job: &str, number: u32, error: &str) -> String {
        if self.ru() {
            format!(
                "Произошла ошибка при остановке сборки {} задачи {}: {}",
                number, job, error
            )
        } else {
            format!("Failed to stop build {} of job {}: {}", number, job, error)
        }
    }

    pub fn builds_list(&self, builds: &[(u32, String, String)]) -> String {
        if builds.is_empty() {
            return if self.ru() {
                "У этой задачи пока нет сборок.".to_string()
            } else {
                "This job has no builds yet.".to_string()
            };
        }
        let (header, line) = if self.ru() {
            ("Список сборок: \n", ["Сборка номер", "состояние"])
        } else {
            ("Builds: \n", ["Build number", "state"])
        };
        let lines: Vec<String> = builds
            .iter()
            .map(|(number, result, url)| {
                format!("{} {}, {}: {}, URL: {}", line[0], number, line[1], result, url)
            })
            .collect();
        format!("{}{}", header, lines.join("\n"))
    }

    pub fn build_info(&self, build: &BuildInfoView) -> String {
        let labels: [&str; 7] = if self.ru() {
            [
                "Информация о сборке",
                "Номер сборки",
                "Результат сборки",
                "URL сборки",
                "Время начала сборки",
                "Продолжительность сборки",
                "Статус сборки",
            ]
        } else {
            [
                "Build information",
                "Build number",
                "Build result",
                "Build URL",
                "Started at",
                "Duration",
                "Build status",
            ]
        };
        let status = match (self.ru(), build.building) {
            (_, true) => self.in_progress(),
            (true, false) => "Завершена",
            (false, false) => "Finished",
        };
        format!(
            "{}:\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n",
            labels[0],
            labels[1],
            build.number,
            labels[2],
            build.result,
            labels[3],
            build.url,
            labels[4],
            build.started,
            labels[5],
            build.duration,
            labels[6],
            status
        )
    }

    pub fn console_output(&self, job: &str, number: u32, output: &str) -> String {
        if self.ru() {
            format!("Вывод консоли сборки {} задачи {}:\n{}", number, job, output)
        } else {
            format!("Console output of build {} of job {}:\n{}", number, job, output)
        }
    }

    /// `dd MMMM yyyy, HH:mm:ss` in UTC with the month name in the locale's form
    pub fn format_timestamp(&self, millis: i64) -> Option<String> {
        let at: DateTime<Utc> = DateTime::from_timestamp_millis(millis)?;
        let months = if self.ru() { &MONTHS_RU } else { &MONTHS_EN };
        Some(format!(
            "{:02} {} {}, {:02}:{:02}:{:02}",
            at.day(),
            months[at.month0() as usize],
            at.year(),
            at.hour(),
            at.minute(),
            at.second()
        ))
    }

    /// Hours, minutes and seconds of a millisecond duration
    pub fn format_duration(&self, millis: u64) -> String {
        let total = millis / 1000;
        let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);
        if self.ru() {
            format!("{} часов {} минут {} секунд", hours, minutes, seconds)
        } else {
            format!("{} hours {} minutes {} seconds", hours, minutes, seconds)
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_russian() {
        let m = Messages::new(Locale::Russian);
        let jobs = ["deploy".to_string(), "backend".to_string()];
        let text = m.server_info("2.401.3", "NORMAL", "2", false, &jobs);
        assert_eq!(
            text,
            "Сервер Jenkins версии 2.401.3 работает в режиме NORMAL с 2 исполнителями. \
             Сервер работает в обычном режиме. \
             Сейчас на сервере есть следующие задачи: deploy, backend."
        );
    }

    #[test]
    fn test_timestamp_genitive_month() {
        let m = Messages::new(Locale::Russian);
        // 2023-11-14T22:13:20Z
        assert_eq!(
            m.format_timestamp(1_700_000_000_000).as_deref(),
            Some("14 ноября 2023, 22:13:20")
        );
        let en = Messages::new(Locale::English);
        assert_eq!(
            en.format_timestamp(0).as_deref(),
            Some("01 January 1970, 00:00:00")
        );
    }

    #[test]
    fn test_duration_keeps_total_hours() {
        let m = Messages::new(Locale::Russian);
        assert_eq!(m.format_duration(3_723_000), "1 часов 2 минут 3 секунд");
        // over a day stays in hours
        assert_eq!(
            m.format_duration(90_061_000),
            "25 часов 1 минут 1 секунд"
        );
    }

    #[test]
    fn test_parameters_empty_and_listed() {
        let m = Messages::new(Locale::Russian);
        assert_eq!(m.job_parameters(&[]), "Для этой задачи не определены параметры.");
        assert_eq!(
            m.job_parameters(&[("BRANCH".into(), "Git branch".into())]),
            "Параметры задачи:\nBRANCH: Git branch.\n"
        );
    }

    #[test]
    fn test_builds_list() {
        let m = Messages::new(Locale::Russian);
        let text = m.builds_list(&[(2, "В процессе".into(), "http://ci/job/deploy/2/".into())]);
        assert_eq!(
            text,
            "Список сборок: \nСборка номер 2, состояние: В процессе, URL: http://ci/job/deploy/2/"
        );
        assert_eq!(m.builds_list(&[]), "У этой задачи пока нет сборок.");
    }

    #[test]
    fn test_english_catalog() {
        let m = Messages::new(Locale::English);
        assert_eq!(m.job_not_found("ghost"), "Job named ghost does not exist.");
        assert_eq!(m.yes_no(true), "yes");
    }

    #[test]
    fn test_placeholders_per_locale() {
        let ru = Messages::new(Locale::Russian);
        assert_eq!(ru.no_information(), "Нет информации");
        assert_eq!(ru.no_description(), "Нет описания");
        assert_eq!(ru.no_url(), "URL не указан");
        assert_eq!(ru.unknown(), "Неизвестно");
        assert_eq!(ru.in_progress(), "В процессе");

        let en = Messages::new(Locale::English);
        assert_eq!(en.no_information(), "No information");
        assert_eq!(en.no_url(), "URL not set");
        assert_eq!(en.in_progress(), "In progress");
    }
}
