/// Languages the interface is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    German,
    French,
    Portuguese,
    Russian,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Spanish,
        Language::German,
        Language::French,
        Language::Portuguese,
        Language::Russian,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::German => "de",
            Language::French => "fr",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
        }
    }

    /// Accepts bare codes and locale names such as `de_DE.UTF-8` or `pt-BR`.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .split(|c| c == '_' || c == '-' || c == '.' || c == '@')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|lang| lang.code() == primary)
    }

    /// Configured override first, then the system locale, then English.
    pub fn detect(preferred: Option<&str>) -> Self {
        if let Some(lang) = preferred.and_then(Self::from_code) {
            return lang;
        }
        system_locale()
            .as_deref()
            .and_then(Self::from_code)
            .unwrap_or(Language::English)
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::English => &EN,
            Language::Spanish => &ES,
            Language::German => &DE,
            Language::French => &FR,
            Language::Portuguese => &PT,
            Language::Russian => &RU,
        }
    }
}

fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

/// Every user-facing message of the interface.
#[derive(Debug)]
pub struct Strings {
    pub window_title: &'static str,
    pub select_video: &'static str,
    pub start_extraction: &'static str,
    pub no_video_selected: &'static str,
    /// Contains `{filename}`
    pub video_selected: &'static str,
    pub extraction_in_progress: &'static str,
    pub extraction_success: &'static str,
    pub extraction_complete_msg: &'static str,
    pub extraction_error: &'static str,
    /// Contains `{error}`
    pub extraction_error_msg: &'static str,
    pub warning: &'static str,
    pub please_select_video: &'static str,
    pub ok: &'static str,
    pub video_files: &'static str,
    pub all_files: &'static str,
}

impl Strings {
    pub fn video_selected(&self, filename: &str) -> String {
        self.video_selected.replace("{filename}", filename)
    }

    pub fn extraction_error_msg(&self, error: &str) -> String {
        self.extraction_error_msg.replace("{error}", error)
    }
}

static EN: Strings = Strings {
    window_title: "Video Frame Extractor",
    select_video: "Select Video",
    start_extraction: "Start Extraction",
    no_video_selected: "No video has been selected.",
    video_selected: "Video selected: {filename}",
    extraction_in_progress: "Extracting frames...",
    extraction_success: "Extraction completed successfully.",
    extraction_complete_msg: "The frame extraction finished successfully.",
    extraction_error: "Error during extraction.",
    extraction_error_msg: "An error occurred during extraction:\n{error}",
    warning: "Warning",
    please_select_video: "Please, select a video first.",
    ok: "OK",
    video_files: "Videos",
    all_files: "All files",
};

static ES: Strings = Strings {
    window_title: "Extractor de Frames de Video",
    select_video: "Seleccionar Video",
    start_extraction: "Empezar Extracción",
    no_video_selected: "No se ha seleccionado ningún video.",
    video_selected: "Video seleccionado: {filename}",
    extraction_in_progress: "Extrayendo frames...",
    extraction_success: "Extracción completada exitosamente.",
    extraction_complete_msg: "La extracción de frames ha finalizado con éxito.",
    extraction_error: "Error durante la extracción.",
    extraction_error_msg: "Ocurrió un error durante la extracción:\n{error}",
    warning: "Advertencia",
    please_select_video: "Por favor, selecciona un video primero.",
    ok: "Aceptar",
    video_files: "Videos",
    all_files: "Todos los archivos",
};

static DE: Strings = Strings {
    window_title: "Video Frame Extraktor",
    select_video: "Video auswählen",
    start_extraction: "Extraktion starten",
    no_video_selected: "Kein Video ausgewählt.",
    video_selected: "Ausgewähltes Video: {filename}",
    extraction_in_progress: "Frames werden extrahiert...",
    extraction_success: "Extraktion erfolgreich abgeschlossen.",
    extraction_complete_msg: "Die Frame-Extraktion wurde erfolgreich abgeschlossen.",
    extraction_error: "Fehler bei der Extraktion.",
    extraction_error_msg: "Bei der Extraktion ist ein Fehler aufgetreten:\n{error}",
    warning: "Warnung",
    please_select_video: "Bitte wählen Sie zuerst ein Video aus.",
    ok: "OK",
    video_files: "Videos",
    all_files: "Alle Dateien",
};

static FR: Strings = Strings {
    window_title: "Extracteur de Frames Vidéo",
    select_video: "Sélectionner une vidéo",
    start_extraction: "Démarrer l'extraction",
    no_video_selected: "Aucune vidéo sélectionnée.",
    video_selected: "Vidéo sélectionnée: {filename}",
    extraction_in_progress: "Extraction des frames...",
    extraction_success: "Extraction terminée avec succès.",
    extraction_complete_msg: "L'extraction des frames est terminée avec succès.",
    extraction_error: "Erreur lors de l'extraction.",
    extraction_error_msg: "Une erreur est survenue lors de l'extraction:\n{error}",
    warning: "Avertissement",
    please_select_video: "Veuillez sélectionner une vidéo en premier.",
    ok: "OK",
    video_files: "Vidéos",
    all_files: "Tous les fichiers",
};

static PT: Strings = Strings {
    window_title: "Extrator de Frames de Vídeo",
    select_video: "Selecionar Vídeo",
    start_extraction: "Iniciar Extração",
    no_video_selected: "Nenhum vídeo selecionado.",
    video_selected: "Vídeo selecionado: {filename}",
    extraction_in_progress: "Extraindo frames...",
    extraction_success: "Extração concluída com sucesso.",
    extraction_complete_msg: "A extração dos frames foi concluída com sucesso.",
    extraction_error: "Erro durante a extração.",
    extraction_error_msg: "Ocorreu um erro durante a extração:\n{error}",
    warning: "Aviso",
    please_select_video: "Por favor, selecione um vídeo primeiro.",
    ok: "OK",
    video_files: "Vídeos",
    all_files: "Todos os arquivos",
};

static RU: Strings = Strings {
    window_title: "Извлекатель кадров видео",
    select_video: "Выбрать видео",
    start_extraction: "Начать извлечение",
    no_video_selected: "Видео не выбрано.",
    video_selected: "Выбранное видео: {filename}",
    extraction_in_progress: "Извлечение кадров...",
    extraction_success: "Извлечение успешно завершено.",
    extraction_complete_msg: "Извлечение кадров успешно завершено.",
    extraction_error: "Ошибка при извлечении.",
    extraction_error_msg: "Произошла ошибка при извлечении:\n{error}",
    warning: "Предупреждение",
    please_select_video: "Пожалуйста, сначала выберите видео.",
    ok: "ОК",
    video_files: "Видео",
    all_files: "Все файлы",
};
