//! Fixed dictionaries used by the extractor.
//!
//! These lists are part of the feature definition: the scoring model was
//! trained against them, so entries must not be reordered, trimmed or
//! "cleaned up" without retraining.

/// Curated trademark/company tokens used to detect domain spoofing.
pub const BRAND_KEYWORDS: &[&str] = &[
    "accenture", "activisionblizzard", "adidas", "adobe", "adultfriendfinder",
    "agriculturalbankofchina", "akamai", "alibaba", "aliexpress", "alipay", "alliance",
    "alliancedata", "allianceone", "allianz", "alphabet", "amazon", "americanairlines",
    "americanexpress", "americantower", "andersons", "apache", "apple", "arrow",
    "ashleymadison", "audi", "autodesk", "avaya", "avisbudget", "avon", "axa", "badoo",
    "baidu", "bankofamerica", "bankofchina", "bankofnewyorkmellon", "barclays", "barnes",
    "bbc", "bbt", "bbva", "bebo", "benchmark", "bestbuy", "bim", "bing", "biogen",
    "blackstone", "blogger", "blogspot", "bmw", "bnpparibas", "boeing", "booking",
    "broadcom", "burberry", "caesars", "canon", "cardinalhealth", "carmax", "carters",
    "caterpillar", "cheesecakefactory", "chinaconstructionbank", "cinemark", "cintas",
    "cisco", "citi", "citigroup", "cnet", "coca-cola", "colgate", "colgate-palmolive",
    "columbiasportswear", "commonwealth", "communityhealth", "continental", "dell",
    "deltaairlines", "deutschebank", "disney", "dolby", "dominos", "donaldson",
    "dreamworks", "dropbox", "eastman", "eastmankodak", "ebay", "edison",
    "electronicarts", "equifax", "equinix", "expedia", "express", "facebook", "fedex",
    "flickr", "footlocker", "ford", "fordmotor", "fossil", "fosterwheeler", "foxconn",
    "fujitsu", "gap", "gartner", "genesis", "genuine", "genworth", "gigamedia",
    "gillette", "github", "global", "globalpayments", "goodyeartire", "google", "gucci",
    "harley-davidson", "harris", "hewlettpackard", "hilton", "hiltonworldwide",
    "hmstatil", "honda", "hsbc", "huawei", "huntingtonbancshares", "hyundai", "ibm",
    "ikea", "imdb", "imgur", "ingbank", "insight", "instagram", "intel", "jackdaniels",
    "jnj", "jpmorgan", "jpmorganchase", "kelly", "kfc", "kindermorgan", "lbrands",
    "lego", "lennox", "lenovo", "lindsay", "linkedin", "livejasmin", "loreal",
    "louisvuitton", "mastercard", "mcdonalds", "mckesson", "mckinsey", "mercedes-benz",
    "microsoft", "microsoftonline", "mini", "mitsubishi", "morganstanley", "motorola",
    "mrcglobal", "mtv", "myspace", "nescafe", "nestle", "netflix", "nike", "nintendo",
    "nissan", "nissanmotor", "nvidia", "nytimes", "oracle", "panasonic", "paypal",
    "pepsi", "pepsico", "philips", "pinterest", "pocket", "pornhub", "porsche", "prada",
    "rabobank", "reddit", "regal", "royalbankofcanada", "samsung", "scotiabank",
    "shell", "siemens", "skype", "snapchat", "sony", "soundcloud", "spiritairlines",
    "spotify", "sprite", "stackexchange", "stackoverflow", "starbucks", "swatch",
    "swift", "symantec", "synaptics", "target", "telegram", "tesla", "teslamotors",
    "theguardian", "homedepot", "piratebay", "tiffany", "tinder", "tmall", "toyota",
    "tripadvisor", "tumblr", "twitch", "twitter", "underarmour", "unilever",
    "universal", "ups", "verizon", "viber", "visa", "volkswagen", "volvocars",
    "walmart", "wechat", "weibo", "whatsapp", "wikipedia", "wordpress", "yahoo",
    "yamaha", "yandex", "youtube", "zara", "zebra", "iphone", "icloud", "itunes",
    "sinara", "normshield", "bga", "sinaralabs", "roksit", "cybrml", "turkcell", "n11",
    "hepsiburada", "migros",
];

/// TLDs disproportionately served by phishing campaigns.
pub const SUSPICIOUS_TLDS: &[&str] = &[
    "fit", "tk", "gp", "ga", "work", "ml", "date", "wang", "men", "icu", "online",
    "click", "xyz", "top", "zip", "country", "stream", "download", "xin", "racing",
    "jetzt", "ren", "mom", "party", "review", "trade", "accountants", "science",
    "ninja", "faith", "cricket", "win", "accountant", "realtor", "christmas", "gdn",
    "link", "asia", "club", "la", "ae", "exposed", "pe", "rs", "audio", "website",
    "bj", "mx", "media", "go.id", "k12.pa.us", "or.kr", "ce.ke", "gob.pe", "gov.az",
    "sa.gov.au",
];

/// Known URL-shortener hosts, matched against the full hostname.
pub const SHORTENER_HOSTS: &[&str] = &[
    "adf.ly", "bc.vc", "bit.do", "bit.ly", "bitly.com", "bkite.com", "buff.ly",
    "buzurl.com", "cli.gs", "cutt.ly", "cutt.us", "cur.lv", "db.tt", "doiop.com",
    "fic.kr", "filoops.info", "ff.im", "go2l.ink", "goo.gl", "ity.im", "j.mp",
    "just.as", "kl.am", "link.zip.net", "loopt.us", "migre.me", "om.ly", "ow.ly",
    "ping.fm", "po.st", "post.ly", "prettylinkpro.com", "q.gs", "qr.ae", "qr.net",
    "rebrand.ly", "rubyurl.com", "s.id", "scrnch.me", "short.ie", "short.to",
    "shorte.st", "snipurl.com", "snipr.com", "su.pr", "t.co", "tiny.cc",
    "tinyurl.com", "to.ly", "tr.im", "twit.ac", "twitthis.com", "twurl.nl", "u.bb",
    "u.to", "url4.eu", "vzturl.com", "v.gd", "wp.me", "x.co", "yourls.org",
    "yfrog.com", "is.gd", "tweez.me", "1url.com", "budurl.com", "lnkd.in", "tinyurl",
];

/// Keywords that frequently appear in credential-harvesting URLs.
pub const PHISH_HINT_KEYWORDS: &[&str] = &[
    "wp", "login", "includes", "admin", "content", "site", "images", "js", "alibaba",
    "css", "myaccount", "dropbox", "themes", "plugins", "signin", "view",
];
